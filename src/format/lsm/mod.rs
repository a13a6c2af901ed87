//! Zeiss LSM plane metadata.
//!
//! Each full-resolution directory of an LSM file carries a CZ_LSMINFO block
//! describing the whole acquisition. The block links to a channel table with
//! per-channel display colors and names.

mod channels;
mod info;

pub use channels::{ChannelColor, ChannelTable, CHANNEL_TABLE_HEADER_SIZE, MAX_NAME_LENGTH};
pub use info::{
    Dimensions, LsmInfo, OverlayOffsets, LSM_INFO_CODE, LSM_INFO_HEADER_SIZE, LSM_INFO_VERSION,
};
