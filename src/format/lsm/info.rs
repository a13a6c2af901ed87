//! CZ_LSMINFO plane metadata block.
//!
//! The block is referenced by tag 0x866C. Its fixed header describes the
//! acquisition (dimensions, voxel sizes, scan mode) and carries absolute
//! offsets to further out-of-line blocks. Only the scan information and the
//! channel table are followed; the remaining offsets are exposed as-is.
//!
//! # Fixed Header Layout (384 bytes, little-endian)
//! ```text
//! 0    u16  code (0x494C)
//! 2    u16  version
//! 4    u32  length (must equal the directory field's count)
//! 8    u32  dimension x, y, z, channels, time (5 words)
//! 28   u32  intensity data type
//! 32   u32  thumbnail x, y
//! 40   f64  pixel size x, y, z
//! 64   f64  origin x, y, z
//! 88   u16  scan type
//! 90   u16  spectral scan
//! 92   u32  data type 2
//! 96   u32  vector / input LUT / output LUT overlay offsets
//! 108  u32  channel colors offset
//! 112  f64  time interval
//! 120  u32  channel data types offset
//! 124  u32  scan information offset
//! 128  u32  application tag, timestamp, event list, ROI, bleach ROI offsets
//! 152  f64  display aspect x, y, z, time
//! 184  u32  mean of ROIs, topo isoline, topo profile, linescan overlay offsets
//! 200  u32  toolbar flags
//! 204  u32  channel wavelength offset
//! 264  u32  dimension P, M, rotations, phases, illuminations
//! 336  u32  tile position offset
//! 376  u32  position offset
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::{IoError, TiffError};
use crate::io::{read_f64_le, read_u16_le, read_u32_le, ByteSource};

use super::channels::ChannelTable;

// =============================================================================
// Constants
// =============================================================================

/// Size of the fixed header read from the start of the block
pub const LSM_INFO_HEADER_SIZE: usize = 384;

/// Magic code at the start of the block ("IL")
pub const LSM_INFO_CODE: u16 = 0x494C;

/// Block version written by ZEN / AIM 4.x
pub const LSM_INFO_VERSION: u16 = 0x0400;

// =============================================================================
// LsmInfo
// =============================================================================

/// Voxel geometry along one axis set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub channels: u32,
    pub time: u32,
}

/// Absolute offsets to blocks this reader does not follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverlayOffsets {
    pub vector_overlay: u32,
    pub input_lut: u32,
    pub output_lut: u32,
    pub channel_data_types: u32,
    pub application_tag: u32,
    pub timestamp: u32,
    pub event_list: u32,
    pub roi: u32,
    pub bleach_roi: u32,
    pub mean_of_rois: u32,
    pub topo_isoline: u32,
    pub topo_profile: u32,
    pub linescan: u32,
    pub channel_wavelength: u32,
    pub tile_position: u32,
    pub position: u32,
}

/// Parsed plane metadata block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LsmInfo {
    pub version: u16,
    /// Declared byte length of the block
    pub length: u32,
    pub dimensions: Dimensions,
    /// 1 = 8-bit, 2 = 12-bit, 5 = 32-bit float, 0 = per-channel
    pub intensity_data_type: u32,
    pub thumbnail_x: u32,
    pub thumbnail_y: u32,
    /// Voxel size in meters
    pub pixel_size: [f64; 3],
    pub origin: [f64; 3],
    pub scan_type: u16,
    pub spectral_scan: u16,
    pub datatype2: u32,
    pub time_interval: f64,
    /// Display aspect x, y, z, time
    pub display_aspect: [f64; 4],
    pub toolbar_flags: u32,
    pub dimension_p: u32,
    pub dimension_m: u32,
    pub rotations: u32,
    pub phases: u32,
    pub illuminations: u32,
    pub channel_colors_offset: u32,
    pub scan_information_offset: u32,
    pub offsets: OverlayOffsets,
    /// Raw per-channel scan words, uninterpreted
    pub scan_information: Vec<u32>,
    pub channels: Option<ChannelTable>,
}

impl LsmInfo {
    /// Read and validate the block at `offset`.
    ///
    /// `field_length` is the count declared by the directory field that
    /// points at the block. It must cover the fixed header and must match
    /// the length the block declares for itself.
    pub fn read<S: ByteSource>(
        source: &S,
        offset: u64,
        field_length: u32,
    ) -> Result<Self, TiffError> {
        if (field_length as usize) < LSM_INFO_HEADER_SIZE {
            return Err(TiffError::InfoTooShort {
                required: LSM_INFO_HEADER_SIZE as u64,
                actual: field_length as u64,
            });
        }

        let bytes = source.read_exact_at(offset, LSM_INFO_HEADER_SIZE)?;
        let mut info = Self::parse_header(&bytes, field_length)?;

        if info.scan_information_offset != 0 {
            info.scan_information = read_words(
                source,
                info.scan_information_offset as u64,
                info.dimensions.channels,
            )?;
        }

        if info.channel_colors_offset != 0 {
            info.channels = Some(ChannelTable::read(
                source,
                info.channel_colors_offset as u64,
            )?);
        }

        debug!(
            offset,
            channels = info.dimensions.channels,
            has_channel_table = info.channels.is_some(),
            "Parsed LSM info block"
        );

        Ok(info)
    }

    /// Parse and validate the fixed header.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than [`LSM_INFO_HEADER_SIZE`].
    pub fn parse_header(bytes: &[u8], field_length: u32) -> Result<Self, TiffError> {
        let u32_at = |pos: usize| read_u32_le(&bytes[pos..pos + 4]);
        let f64_at = |pos: usize| read_f64_le(&bytes[pos..pos + 8]);

        let code = read_u16_le(&bytes[0..2]);
        if code != LSM_INFO_CODE {
            return Err(TiffError::InvalidInfoCode(code));
        }

        let version = read_u16_le(&bytes[2..4]);
        if version != LSM_INFO_VERSION {
            return Err(TiffError::InvalidInfoVersion(version));
        }

        let length = u32_at(4);
        if length != field_length {
            return Err(TiffError::InfoLengthMismatch {
                declared: length,
                field: field_length,
            });
        }

        Ok(LsmInfo {
            version,
            length,
            dimensions: Dimensions {
                x: u32_at(8),
                y: u32_at(12),
                z: u32_at(16),
                channels: u32_at(20),
                time: u32_at(24),
            },
            intensity_data_type: u32_at(28),
            thumbnail_x: u32_at(32),
            thumbnail_y: u32_at(36),
            pixel_size: [f64_at(40), f64_at(48), f64_at(56)],
            origin: [f64_at(64), f64_at(72), f64_at(80)],
            scan_type: read_u16_le(&bytes[88..90]),
            spectral_scan: read_u16_le(&bytes[90..92]),
            datatype2: u32_at(92),
            time_interval: f64_at(112),
            display_aspect: [f64_at(152), f64_at(160), f64_at(168), f64_at(176)],
            toolbar_flags: u32_at(200),
            dimension_p: u32_at(264),
            dimension_m: u32_at(268),
            rotations: u32_at(272),
            phases: u32_at(276),
            illuminations: u32_at(280),
            channel_colors_offset: u32_at(108),
            scan_information_offset: u32_at(124),
            offsets: OverlayOffsets {
                vector_overlay: u32_at(96),
                input_lut: u32_at(100),
                output_lut: u32_at(104),
                channel_data_types: u32_at(120),
                application_tag: u32_at(128),
                timestamp: u32_at(132),
                event_list: u32_at(136),
                roi: u32_at(140),
                bleach_roi: u32_at(144),
                mean_of_rois: u32_at(184),
                topo_isoline: u32_at(188),
                topo_profile: u32_at(192),
                linescan: u32_at(196),
                channel_wavelength: u32_at(204),
                tile_position: u32_at(336),
                position: u32_at(376),
            },
            scan_information: Vec::new(),
            channels: None,
        })
    }
}

/// Read `count` little-endian u32 words at `offset`.
pub(crate) fn read_words<S: ByteSource>(
    source: &S,
    offset: u64,
    count: u32,
) -> Result<Vec<u32>, TiffError> {
    let len = (count as usize)
        .checked_mul(4)
        .ok_or(IoError::RangeOutOfBounds {
            offset,
            requested: count as u64 * 4,
            size: source.size(),
        })?;
    let bytes = source.read_exact_at(offset, len)?;
    Ok(bytes.chunks_exact(4).map(read_u32_le).collect())
}

// =============================================================================
// Tests
// =============================================================================
