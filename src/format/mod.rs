//! Parsers for the LSM container format.
//!
//! - [`tiff`]: header, field records and the directory chain
//! - [`lsm`]: the CZ_LSMINFO plane metadata block and channel table
//! - [`strip`]: pixel strip reading and LZW decoding
//! - [`predictor`]: reversal of horizontal differencing, applied by pixel consumers

pub mod lsm;
pub mod predictor;
pub mod strip;
pub mod tiff;

pub use strip::{read_strip, StripData};
