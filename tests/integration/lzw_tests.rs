//! LZW codec tests through the public API.

use lsm_reader::lzw::{self, DEFAULT_MAX_BITS, MAX_BITS, MIN_BITS};
use lsm_reader::{ErrorKind, LzwError, TiffError};

use super::test_utils::{difference_rows, gradient_image};

/// Deterministic pseudo-random bytes (xorshift).
fn noise(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x9E37_79B9;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

// =============================================================================
// Encoding
// =============================================================================

#[test]
fn test_repeated_byte_stream() {
    // Codes 65, 258, 259, 259, END at 9 bits, MSB-first
    let encoded = lzw::encode(b"AAAAAAAAA", 9);
    assert_eq!(encoded, vec![0x20, 0xC0, 0xA0, 0x70, 0x38, 0x08]);
    assert_eq!(lzw::decode(&encoded).unwrap(), b"AAAAAAAAA");
}

#[test]
fn test_empty_input() {
    let encoded = lzw::encode(&[], DEFAULT_MAX_BITS);
    assert!(!encoded.is_empty());
    assert!(lzw::decode(&encoded).unwrap().is_empty());
}

#[test]
fn test_round_trip_at_every_width() {
    let inputs = [
        b"TOBEORNOTTOBEORTOBEORNOT".to_vec(),
        vec![0u8; 10_000],
        noise(20_000),
        difference_rows(&gradient_image(256, 64), 256),
    ];

    for max_bits in MIN_BITS..=MAX_BITS {
        for input in &inputs {
            let encoded = lzw::encode(input, max_bits);
            assert_eq!(
                &lzw::decode(&encoded).unwrap(),
                input,
                "max_bits {} len {}",
                max_bits,
                input.len()
            );
        }
    }
}

#[test]
fn test_dictionary_reset_round_trip() {
    let input = noise(5_000);
    let (encoded, stats) = lzw::encode_with_stats(&input, 9);
    assert!(stats.clear_codes >= 1);
    assert_eq!(lzw::decode(&encoded).unwrap(), input);
}

#[test]
fn test_out_of_range_widths_are_clamped() {
    let input = noise(4_000);
    assert_eq!(lzw::encode(&input, 20), lzw::encode(&input, MAX_BITS));
    assert_eq!(lzw::encode(&input, 4), lzw::encode(&input, DEFAULT_MAX_BITS));
}

// =============================================================================
// Decoding Errors
// =============================================================================

#[test]
fn test_unassigned_code_is_rejected() {
    // First 9-bit code is 511, which no dictionary entry has reached yet
    let err = lzw::decode(&[0xFF, 0x80]).unwrap_err();
    assert!(matches!(
        err,
        LzwError::InvalidCode {
            code: 511,
            next_code: 258
        }
    ));

    let err = TiffError::from(err);
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_missing_end_code_returns_prefix() {
    let mut encoded = lzw::encode(b"AAAAAAAAA", 9);
    // Drop the END code and padding; the last full code is 259
    encoded.truncate(4);
    let decoded = lzw::decode(&encoded).unwrap();
    assert_eq!(decoded, b"AAAAAA");
}

// =============================================================================
// Width Survey
// =============================================================================

#[test]
fn test_survey_covers_every_width() {
    let input = difference_rows(&gradient_image(512, 128), 512);
    let survey = lzw::survey_max_bits(&input).unwrap();

    let widths: Vec<u8> = survey.trials.iter().map(|t| t.max_bits).collect();
    assert_eq!(widths, (MIN_BITS..=MAX_BITS).collect::<Vec<_>>());

    let best = survey.best().unwrap();
    for trial in &survey.trials {
        assert!(best.compressed_len <= trial.compressed_len);
        assert_eq!(
            trial.compressed_len,
            lzw::encode(&input, trial.max_bits).len()
        );
    }
}

#[test]
fn test_survey_of_empty_input() {
    assert!(lzw::survey_max_bits(&[]).is_none());
}
