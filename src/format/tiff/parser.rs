//! LSM header and field record parsing.
//!
//! LSM is a little-endian-only TIFF variant. The header is read as three
//! 16-bit words and directory links are 16-bit offsets.
//!
//! # Header Structure (6 bytes)
//! ```text
//! Bytes 0-1: Byte order (must be 0x4949 = "II")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-5: Offset to first directory
//! ```
//!
//! # Directory Structure
//! ```text
//! 2 bytes         field count N
//! N x 12 bytes    field records
//! 2 bytes         offset of next directory (0 = end of chain)
//! ```
//!
//! # Field Record (12 bytes)
//! ```text
//! Bytes 0-1:  Tag
//! Bytes 2-3:  Field type
//! Bytes 4-7:  Count (number of elements)
//! Bytes 8-11: Value, or offset of out-of-line data
//! ```

use crate::error::TiffError;
use crate::io::{read_u16_le, read_u32_le};

use super::tags::{FieldType, TiffTag};

// =============================================================================
// Constants
// =============================================================================

/// Byte order marker for little-endian ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Size of the LSM header in bytes
pub const HEADER_SIZE: usize = 6;

/// Size of a field record in bytes
pub const FIELD_SIZE: usize = 12;

/// Size of the field count at the start of a directory
pub const FIELD_COUNT_SIZE: usize = 2;

/// Size of the next-directory link at the end of a directory
pub const NEXT_OFFSET_SIZE: usize = 2;

// =============================================================================
// LsmHeader
// =============================================================================

/// Parsed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LsmHeader {
    /// Offset to the first directory in the file (0 = no directories)
    pub first_ifd_offset: u16,
}

impl LsmHeader {
    /// Parse the header from raw bytes.
    ///
    /// # Errors
    /// - `FileTooSmall` if there are fewer than 6 bytes
    /// - `InvalidMagic` if the byte order marker is not "II"
    /// - `InvalidVersion` if the version is not 42
    pub fn parse(bytes: &[u8]) -> Result<Self, TiffError> {
        if bytes.len() < HEADER_SIZE {
            return Err(TiffError::FileTooSmall {
                required: HEADER_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        let magic = read_u16_le(&bytes[0..2]);
        if magic != BYTE_ORDER_LITTLE_ENDIAN {
            return Err(TiffError::InvalidMagic(magic));
        }

        let version = read_u16_le(&bytes[2..4]);
        if version != VERSION_TIFF {
            return Err(TiffError::InvalidVersion(version));
        }

        Ok(LsmHeader {
            first_ifd_offset: read_u16_le(&bytes[4..6]),
        })
    }
}

/// Total byte size of a directory with `field_count` fields.
#[inline]
pub const fn directory_size(field_count: u16) -> usize {
    FIELD_COUNT_SIZE + field_count as usize * FIELD_SIZE + NEXT_OFFSET_SIZE
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A single 12-byte field record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Raw tag ID
    pub tag_id: u16,

    /// Parsed field type, `None` for unknown type codes
    pub field_type: Option<FieldType>,

    /// Raw field type code
    pub field_type_raw: u16,

    /// Number of elements
    pub count: u32,

    /// The 4-byte value slot, read as a little-endian word
    pub value: u32,
}

impl IfdEntry {
    /// Parse a field record from exactly 12 bytes.
    ///
    /// # Panics
    /// Panics if `bytes` has fewer than 12 bytes.
    pub fn parse(bytes: &[u8]) -> Self {
        let field_type_raw = read_u16_le(&bytes[2..4]);
        IfdEntry {
            tag_id: read_u16_le(&bytes[0..2]),
            field_type: FieldType::from_u16(field_type_raw),
            field_type_raw,
            count: read_u32_le(&bytes[4..8]),
            value: read_u32_le(&bytes[8..12]),
        }
    }

    /// The recognized tag, if any.
    #[inline]
    pub fn tag(&self) -> Option<TiffTag> {
        TiffTag::from_u16(self.tag_id)
    }

    /// The inline scalar value masked to the field's declared width.
    ///
    /// Unknown field types keep the full 32-bit word.
    #[inline]
    pub fn scalar(&self) -> u32 {
        let mask = self
            .field_type
            .map(FieldType::scalar_mask)
            .unwrap_or(u32::MAX);
        self.value & mask
    }

    /// The value slot interpreted as an absolute file offset.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.value as u64
    }
}

// =============================================================================
// Tests
// =============================================================================
