//! Channel names and display colors.
//!
//! The channel table starts with a 24-byte header. The color and name
//! arrays are located relative to the header's own position:
//!
//! ```text
//! 0   u32  block size
//! 4   u32  number of colors
//! 8   u32  number of names
//! 12  u32  colors offset (relative to table start)
//! 16  u32  names offset (relative to table start)
//! 20  u32  mono flag
//! ```
//!
//! Colors are packed `0xAABBGGRR` words. Names are a sequence of
//! length-prefixed strings: a u32 byte length followed by that many bytes.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::TiffError;
use crate::io::{read_u32_le, ByteSource};

use super::info::read_words;

/// Size of the channel table header
pub const CHANNEL_TABLE_HEADER_SIZE: usize = 24;

/// Longest channel name accepted, in bytes
pub const MAX_NAME_LENGTH: u32 = 1024;

// =============================================================================
// ChannelColor
// =============================================================================

/// Display color of one channel, as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChannelColor(pub u32);

impl ChannelColor {
    #[inline]
    pub const fn red(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// True when all three color components are saturated.
    #[inline]
    pub const fn is_white(self) -> bool {
        self.0 & 0x00FF_FFFF == 0x00FF_FFFF
    }

    /// Build a 256-entry RGB look-up table for 8-bit intensities.
    ///
    /// White channels map to a plain gray ramp. Any other color scales each
    /// component linearly from black at intensity 0 to the full color at 255.
    pub fn lut8(self) -> [[u8; 3]; 256] {
        let mut lut = [[0u8; 3]; 256];
        if self.is_white() {
            for (i, entry) in lut.iter_mut().enumerate() {
                *entry = [i as u8; 3];
            }
        } else {
            let scale = |component: u8, i: usize| (component as usize * i / 255) as u8;
            for (i, entry) in lut.iter_mut().enumerate() {
                *entry = [
                    scale(self.red(), i),
                    scale(self.green(), i),
                    scale(self.blue(), i),
                ];
            }
        }
        lut
    }
}

impl fmt::Display for ChannelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

// =============================================================================
// ChannelTable
// =============================================================================

/// Parsed channel table.
///
/// Names are cut at the first NUL and decoded as UTF-8 with invalid
/// sequences replaced by U+FFFD, so a non-UTF-8 name can differ in byte
/// length from its stored form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelTable {
    pub block_size: u32,
    pub mono: u32,
    pub colors: Vec<ChannelColor>,
    pub names: Vec<String>,
}

impl ChannelTable {
    /// Read the table whose header starts at absolute `offset`.
    pub fn read<S: ByteSource>(source: &S, offset: u64) -> Result<Self, TiffError> {
        let header = source.read_exact_at(offset, CHANNEL_TABLE_HEADER_SIZE)?;
        let word = |index: usize| read_u32_le(&header[index * 4..index * 4 + 4]);

        let block_size = word(0);
        let number_colors = word(1);
        let number_names = word(2);
        let colors_offset = word(3);
        let names_offset = word(4);
        let mono = word(5);

        let colors = read_words(source, offset + colors_offset as u64, number_colors)?
            .into_iter()
            .map(ChannelColor)
            .collect();

        let names = read_names(source, offset + names_offset as u64, number_names)?;

        debug!(
            offset,
            colors = number_colors,
            names = number_names,
            "Parsed channel table"
        );

        Ok(ChannelTable {
            block_size,
            mono,
            colors,
            names,
        })
    }

    /// Pair each color with its name when both lists have the same length.
    pub fn labeled_colors(&self) -> Option<impl Iterator<Item = (ChannelColor, &str)> + '_> {
        if self.colors.len() != self.names.len() {
            return None;
        }
        Some(
            self.colors
                .iter()
                .copied()
                .zip(self.names.iter().map(String::as_str)),
        )
    }
}

/// Read `count` length-prefixed strings packed back to back at `offset`.
fn read_names<S: ByteSource>(
    source: &S,
    mut offset: u64,
    count: u32,
) -> Result<Vec<String>, TiffError> {
    // The count is untrusted, so the vector grows as names are read
    let mut names = Vec::new();

    for index in 0..count as usize {
        let prefix = source.read_exact_at(offset, 4)?;
        let length = read_u32_le(&prefix);
        offset += 4;

        if length == 0 {
            names.push(String::new());
            continue;
        }
        if length > MAX_NAME_LENGTH {
            return Err(TiffError::NameTooLong {
                index,
                length,
                max: MAX_NAME_LENGTH,
            });
        }

        let raw = source.read_exact_at(offset, length as usize)?;
        offset += length as u64;

        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        names.push(String::from_utf8_lossy(&raw[..end]).into_owned());
    }

    Ok(names)
}

// =============================================================================
// Tests
// =============================================================================
