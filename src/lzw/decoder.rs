//! LZW decompression.

use tracing::warn;

use crate::error::LzwError;

use super::bitstream::BitReader;
use super::{CLEAR_CODE, END_CODE, FIRST_CODE, MAX_DECODE_BITS, MIN_BITS};

#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    /// Code this entry extends (only meaningful for codes >= 258)
    prev: u16,
    /// Last byte of this entry's expansion
    byte: u8,
}

/// Decoder dictionary, grown in lockstep with the encoder's.
///
/// Each ordinary code reserves the entry `next_code` with `prev` set to that
/// code; its terminal byte is filled in when the following code is read.
struct DecodeDictionary {
    entries: Vec<Entry>,
    next_code: u32,
    next_shift: u32,
    bits: u8,
}

impl DecodeDictionary {
    fn new() -> Self {
        let mut dict = Self {
            entries: Vec::new(),
            next_code: FIRST_CODE,
            next_shift: 1 << MIN_BITS,
            bits: MIN_BITS,
        };
        dict.reset();
        dict
    }

    fn reset(&mut self) {
        self.entries.clear();
        self.entries.resize(1 << MIN_BITS, Entry::default());
        for (value, entry) in self.entries.iter_mut().take(256).enumerate() {
            entry.byte = value as u8;
        }
        self.next_code = FIRST_CODE;
        self.next_shift = 1 << MIN_BITS;
        self.bits = MIN_BITS;
    }

    /// First byte of the expansion of `code`.
    fn root(&self, mut code: u32) -> u8 {
        while code > 255 {
            code = self.entries[code as usize].prev as u32;
        }
        code as u8
    }

    /// Push the expansion of `code` onto `scratch` in reverse order.
    fn expand_reversed(&self, mut code: u32, scratch: &mut Vec<u8>) {
        scratch.clear();
        while code > 255 {
            let entry = self.entries[code as usize];
            scratch.push(entry.byte);
            code = entry.prev as u32;
        }
        scratch.push(code as u8);
    }

    /// Count one more assigned code, widening when the table fills.
    fn advance(&mut self) -> Result<(), LzwError> {
        self.next_code += 1;
        if self.next_code >= self.next_shift {
            self.bits += 1;
            if self.bits > MAX_DECODE_BITS {
                return Err(LzwError::CodeWidthOverflow(self.bits));
            }
            self.next_shift *= 2;
            self.entries
                .resize(self.next_shift as usize, Entry::default());
        }
        Ok(())
    }
}

/// Decompress an LZW stream produced by [`super::encode`].
///
/// Decoding stops at the END code, or when input runs out. A code that refers
/// to an entry not yet assigned, or a code width above 16 bits, is corruption
/// and fails the whole call.
pub fn decode(data: &[u8]) -> Result<Vec<u8>, LzwError> {
    let mut reader = BitReader::new(data);
    let mut dict = DecodeDictionary::new();
    let mut output = Vec::with_capacity(data.len() * 2);
    let mut scratch = Vec::new();

    loop {
        let Some(code) = reader.read(dict.bits) else {
            warn!(
                decoded = output.len(),
                "LZW stream ended without an END code"
            );
            break;
        };

        if code == END_CODE {
            break;
        }
        if code == CLEAR_CODE {
            dict.reset();
            continue;
        }
        if code >= dict.next_code {
            return Err(LzwError::InvalidCode {
                code,
                next_code: dict.next_code,
            });
        }

        let root = dict.root(code);
        let reserved = dict.next_code as usize;
        dict.entries[reserved].prev = code as u16;
        // The previous reservation is completed by this code's first byte
        dict.entries[reserved - 1].byte = root;

        dict.expand_reversed(code, &mut scratch);
        output.extend(scratch.iter().rev());

        dict.advance()?;
    }

    Ok(output)
}
