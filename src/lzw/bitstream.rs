//! MSB-first bit packing for variable-width LZW codes.
//!
//! Codes are appended most significant bit first and bytes are emitted as
//! soon as eight bits are available. The code width may change between two
//! writes, so both sides must track width transitions identically.

/// MSB-first bit writer.
#[derive(Debug, Default)]
pub(crate) struct BitWriter {
    output: Vec<u8>,
    /// Pending bits, right-aligned
    buffer: u32,
    bits_in_buffer: u8,
}

impl BitWriter {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Append the low `width` bits of `code`.
    ///
    /// `width` is at most 16, so the buffer never holds more than 23 bits.
    pub(crate) fn write(&mut self, code: u32, width: u8) {
        debug_assert!(width <= 16);
        self.buffer = (self.buffer << width) | (code & ((1u32 << width) - 1));
        self.bits_in_buffer += width;

        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            self.output.push((self.buffer >> self.bits_in_buffer) as u8);
        }
        self.buffer &= (1u32 << self.bits_in_buffer) - 1;
    }

    /// Flush remaining bits, right-padded with zeros, and return the bytes.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            let pad = 8 - self.bits_in_buffer;
            self.output.push((self.buffer << pad) as u8);
        }
        self.output
    }
}

/// MSB-first bit reader.
#[derive(Debug)]
pub(crate) struct BitReader<'a> {
    data: &'a [u8],
    byte_pos: usize,
    buffer: u32,
    bits_in_buffer: u8,
}

impl<'a> BitReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Read the next `width`-bit code.
    ///
    /// Returns `None` once every input byte has been consumed and fewer than
    /// `width` bits remain buffered; for LZW widths those bits can only be
    /// padding. A code that straddles the end of input is completed with
    /// zero bits.
    pub(crate) fn read(&mut self, width: u8) -> Option<u32> {
        if self.byte_pos >= self.data.len() && self.bits_in_buffer < width {
            return None;
        }

        while self.bits_in_buffer < width {
            if let Some(&byte) = self.data.get(self.byte_pos) {
                self.byte_pos += 1;
                self.buffer = (self.buffer << 8) | byte as u32;
                self.bits_in_buffer += 8;
            } else {
                self.buffer <<= width - self.bits_in_buffer;
                self.bits_in_buffer = width;
            }
        }

        self.bits_in_buffer -= width;
        let code = self.buffer >> self.bits_in_buffer;
        self.buffer &= (1u32 << self.bits_in_buffer) - 1;
        Some(code)
    }
}
