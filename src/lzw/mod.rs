//! Variable-width LZW codec.
//!
//! This is the codec LSM strips are compressed with. Codes start at 9 bits
//! and widen by one bit each time the dictionary fills, up to a caller-chosen
//! maximum between 9 and 15 bits. When the maximum is reached the encoder
//! emits a CLEAR code and starts over with an empty dictionary.
//!
//! # Reserved Codes
//!
//! ```text
//! 0..=255  literal bytes
//! 256      CLEAR (reset dictionary and width)
//! 257      END (end of data)
//! 258..    dictionary entries
//! ```
//!
//! Codes are packed MSB-first. The decoder needs no knowledge of the
//! encoder's maximum width: it widens on the same schedule and reads the
//! CLEAR code at whatever width it has reached.

mod bitstream;
mod decoder;
mod encoder;

use tracing::debug;

pub use decoder::decode;
pub use encoder::{clamp_max_bits, encode, encode_with_stats, EncodeStats};

/// Clear table marker
pub const CLEAR_CODE: u32 = 256;

/// End-of-data marker
pub const END_CODE: u32 = 257;

/// First code assigned to a dictionary entry
pub const FIRST_CODE: u32 = 258;

/// Initial code width
pub const MIN_BITS: u8 = 9;

/// Largest maximum width the encoder accepts
pub const MAX_BITS: u8 = 15;

/// Width used when the requested maximum is below [`MIN_BITS`]
pub const DEFAULT_MAX_BITS: u8 = 12;

/// Hard ceiling on the decoder's code width
pub const MAX_DECODE_BITS: u8 = 16;

// =============================================================================
// Max-width Survey
// =============================================================================

/// Outcome of compressing a buffer at one maximum width.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionTrial {
    pub max_bits: u8,
    pub compressed_len: usize,
    /// Compressed size as a percentage of the input size
    pub ratio: f64,
    pub clear_codes: usize,
}

/// Results of compressing one buffer at every width from 9 to 15 bits.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxBitsSurvey {
    pub trials: Vec<CompressionTrial>,
}

impl MaxBitsSurvey {
    /// Trial with the smallest output. Ties go to the narrower width.
    pub fn best(&self) -> Option<&CompressionTrial> {
        self.trials.iter().fold(None, |best, trial| match best {
            Some(b) if b.compressed_len <= trial.compressed_len => Some(b),
            _ => Some(trial),
        })
    }
}

/// Compress `data` at each maximum width and report the sizes.
///
/// Returns `None` for empty input, where a ratio is meaningless.
pub fn survey_max_bits(data: &[u8]) -> Option<MaxBitsSurvey> {
    if data.is_empty() {
        return None;
    }

    let trials: Vec<CompressionTrial> = (MIN_BITS..=MAX_BITS)
        .map(|max_bits| {
            let (encoded, stats) = encode_with_stats(data, max_bits);
            CompressionTrial {
                max_bits,
                compressed_len: encoded.len(),
                ratio: 100.0 * encoded.len() as f64 / data.len() as f64,
                clear_codes: stats.clear_codes,
            }
        })
        .collect();

    let survey = MaxBitsSurvey { trials };
    if let Some(best) = survey.best() {
        debug!(
            input_len = data.len(),
            max_bits = best.max_bits,
            ratio = best.ratio,
            "LZW survey complete"
        );
    }
    Some(survey)
}
