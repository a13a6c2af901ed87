//! LZW compression.

use super::bitstream::BitWriter;
use super::{CLEAR_CODE, DEFAULT_MAX_BITS, END_CODE, FIRST_CODE, MAX_BITS, MIN_BITS};

/// Counters collected while encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Number of dictionary codes written, excluding CLEAR and END
    pub codes_written: usize,
    /// Number of CLEAR codes written (dictionary resets)
    pub clear_codes: usize,
}

/// Normalize a requested maximum code width.
///
/// Widths above 15 are capped at 15; widths below 9 select the default of 12.
pub fn clamp_max_bits(max_bits: u8) -> u8 {
    if max_bits > MAX_BITS {
        MAX_BITS
    } else if max_bits < MIN_BITS {
        DEFAULT_MAX_BITS
    } else {
        max_bits
    }
}

/// Encoder dictionary: one row of 256 successor codes per assigned code.
///
/// A zero entry means "no successor", which is unambiguous because code 0 is
/// a literal and can never be assigned as a successor.
struct EncodeDictionary {
    next: Vec<[u16; 256]>,
    next_code: u32,
    next_shift: u32,
    bits: u8,
}

impl EncodeDictionary {
    fn new() -> Self {
        Self {
            next: vec![[0u16; 256]; 1 << MIN_BITS],
            next_code: FIRST_CODE,
            next_shift: 1 << MIN_BITS,
            bits: MIN_BITS,
        }
    }

    #[inline]
    fn lookup(&self, code: u16, byte: u8) -> Option<u16> {
        match self.next[code as usize][byte as usize] {
            0 => None,
            next => Some(next),
        }
    }

    #[inline]
    fn insert(&mut self, code: u16, byte: u8) {
        self.next[code as usize][byte as usize] = self.next_code as u16;
        self.next_code += 1;
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.next_code == self.next_shift
    }

    /// Widen codes by one bit and double the addressable table.
    fn grow(&mut self) {
        self.bits += 1;
        self.next_shift *= 2;
        self.next.resize(self.next_shift as usize, [0u16; 256]);
    }

    fn reset(&mut self) {
        self.next.truncate(1 << MIN_BITS);
        for row in &mut self.next {
            row.fill(0);
        }
        self.next_code = FIRST_CODE;
        self.next_shift = 1 << MIN_BITS;
        self.bits = MIN_BITS;
    }
}

/// Compress `data` with codes growing from 9 bits up to `max_bits`.
///
/// See [`clamp_max_bits`] for how out-of-range widths are handled.
pub fn encode(data: &[u8], max_bits: u8) -> Vec<u8> {
    encode_with_stats(data, max_bits).0
}

/// Compress `data` and report how many codes and dictionary resets it took.
pub fn encode_with_stats(data: &[u8], max_bits: u8) -> (Vec<u8>, EncodeStats) {
    let max_bits = clamp_max_bits(max_bits);
    let mut stats = EncodeStats::default();
    let mut writer = BitWriter::with_capacity(data.len() / 2 + 4);

    let Some((&first, rest)) = data.split_first() else {
        writer.write(END_CODE as u32, MIN_BITS);
        return (writer.finish(), stats);
    };

    let mut dict = EncodeDictionary::new();
    let mut code = first as u16;

    for &byte in rest {
        match dict.lookup(code, byte) {
            Some(next) => code = next,
            None => {
                writer.write(code as u32, dict.bits);
                stats.codes_written += 1;
                dict.insert(code, byte);
                code = byte as u16;
            }
        }

        if dict.is_full() {
            if dict.bits == max_bits {
                // The decoder has already widened by one bit at this point
                writer.write(CLEAR_CODE as u32, dict.bits + 1);
                stats.clear_codes += 1;
                dict.reset();
            } else {
                dict.grow();
            }
        }
    }

    writer.write(code as u32, dict.bits);
    stats.codes_written += 1;

    // The decoder reserves an entry for every code it reads, including the
    // last one, and widens when that reservation fills the table.
    let end_bits = if dict.next_code + 1 >= dict.next_shift {
        dict.bits + 1
    } else {
        dict.bits
    };
    writer.write(END_CODE as u32, end_bits);

    (writer.finish(), stats)
}
