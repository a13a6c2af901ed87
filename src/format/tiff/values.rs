//! Field value resolution.
//!
//! A field with a count of one holds its value in the record's value slot.
//! Any longer list lives at the absolute offset stored in that slot,
//! whatever its element size. List fields are fetched with a single read so
//! a strip table costs one positioned read regardless of its length.

use bytes::Bytes;

use crate::error::{IoError, TiffError};
use crate::io::{read_u16_le, read_u32_le, ByteSource};

use super::parser::IfdEntry;
use super::tags::FieldType;

// =============================================================================
// ValueReader
// =============================================================================

/// Resolves field values against a byte source.
pub struct ValueReader<'a, S: ByteSource> {
    source: &'a S,
}

impl<'a, S: ByteSource> ValueReader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Read the raw bytes backing a field.
    ///
    /// A single value comes from the record's value slot, truncated to the
    /// element size. Two or more values are read from the file at the slot's
    /// offset.
    pub fn read_bytes(&self, entry: &IfdEntry) -> Result<Bytes, TiffError> {
        let field_type = entry.field_type.ok_or(TiffError::UnknownFieldType {
            tag: entry.tag_id,
            field_type: entry.field_type_raw,
        })?;

        let element_size = field_type.size_in_bytes();

        if entry.count <= 1 {
            let slot = entry.value.to_le_bytes();
            let len = element_size.min(slot.len()) * entry.count as usize;
            return Ok(Bytes::copy_from_slice(&slot[..len]));
        }

        let size = element_size as u64 * entry.count as u64;
        let len = usize::try_from(size).map_err(|_| IoError::RangeOutOfBounds {
            offset: entry.offset(),
            requested: size,
            size: self.source.size(),
        })?;
        Ok(self.source.read_exact_at(entry.offset(), len)?)
    }

    /// Read a list field as 32-bit values.
    ///
    /// A single element is the masked value slot, for any field type.
    /// Longer lists are read at the slot's offset with Byte and Short
    /// elements widened; lists of unknown type cannot be sized and fail.
    pub fn read_u32_list(&self, entry: &IfdEntry) -> Result<Vec<u32>, TiffError> {
        match entry.count {
            0 => Ok(Vec::new()),
            1 => Ok(vec![entry.scalar()]),
            _ => {
                let field_type = entry.field_type.ok_or(TiffError::UnknownFieldType {
                    tag: entry.tag_id,
                    field_type: entry.field_type_raw,
                })?;
                let bytes = self.read_bytes(entry)?;
                Ok(parse_u32_array(&bytes, field_type))
            }
        }
    }

    /// Read a list field as 16-bit values, truncating wider elements.
    pub fn read_u16_list(&self, entry: &IfdEntry) -> Result<Vec<u16>, TiffError> {
        Ok(self
            .read_u32_list(entry)?
            .into_iter()
            .map(|v| v as u16)
            .collect())
    }
}

// =============================================================================
// Array Parsing
// =============================================================================

/// Decode a packed little-endian array of `field_type` elements.
///
/// Rational elements yield their numerator.
pub fn parse_u32_array(bytes: &[u8], field_type: FieldType) -> Vec<u32> {
    let size = field_type.size_in_bytes();
    bytes
        .chunks_exact(size)
        .map(|chunk| match size {
            1 => chunk[0] as u32,
            2 => read_u16_le(chunk) as u32,
            _ => read_u32_le(chunk),
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
