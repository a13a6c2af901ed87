use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use bytes::Bytes;

use crate::error::IoError;

/// Trait for reading byte ranges from an addressable source.
///
/// This abstraction lets the container parser work the same way over a file
/// on disk and over an in-memory buffer. Every read is positioned, so the
/// parser never depends on a shared cursor.
pub trait ByteSource {
    /// Read exactly `len` bytes starting at `offset`.
    ///
    /// Returns an error if the range is out of bounds or if the read fails.
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError>;

    /// Get the total size of the source in bytes.
    fn size(&self) -> u64;

    /// Get an identifier for this source (for logging).
    fn identifier(&self) -> &str;
}

impl<S: ByteSource + ?Sized> ByteSource for &S {
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        (**self).read_exact_at(offset, len)
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn identifier(&self) -> &str {
        (**self).identifier()
    }
}

/// Reject ranges that end past `size` before touching the source.
fn check_range(offset: u64, len: usize, size: u64) -> Result<(), IoError> {
    let end = offset.checked_add(len as u64);
    match end {
        Some(end) if end <= size => Ok(()),
        _ => Err(IoError::RangeOutOfBounds {
            offset,
            requested: len as u64,
            size,
        }),
    }
}

// =============================================================================
// MemorySource
// =============================================================================

/// Byte source backed by an in-memory buffer.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Bytes,
    identifier: String,
}

impl MemorySource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            identifier: "memory".to_string(),
        }
    }

    /// Attach a name used in log lines and error messages.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }
}

impl ByteSource for MemorySource {
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        check_range(offset, len, self.size())?;
        let start = offset as usize;
        Ok(self.data.slice(start..start + len))
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// FileSource
// =============================================================================

/// Byte source backed by a file on disk.
///
/// The file handle sits behind a mutex so positioned reads stay correct even
/// though `Seek` needs `&mut File`. Each parse should own its own source.
#[derive(Debug)]
pub struct FileSource {
    file: Mutex<File>,
    size: u64,
    identifier: String,
}

impl FileSource {
    /// Open a file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let identifier = path.display().to_string();
        let read_error = |err: std::io::Error| IoError::Read {
            identifier: identifier.clone(),
            message: err.to_string(),
        };

        let file = File::open(path).map_err(read_error)?;
        let size = file.metadata().map_err(read_error)?.len();

        Ok(Self {
            file: Mutex::new(file),
            size,
            identifier,
        })
    }
}

impl ByteSource for FileSource {
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        check_range(offset, len, self.size)?;

        let read_error = |message: String| IoError::Read {
            identifier: self.identifier.clone(),
            message,
        };

        let mut file = self
            .file
            .lock()
            .map_err(|_| read_error("file handle lock poisoned".to_string()))?;

        file.seek(SeekFrom::Start(offset))
            .map_err(|e| read_error(e.to_string()))?;

        let mut buf = vec![0u8; len];
        file.read_exact(&mut buf)
            .map_err(|e| read_error(e.to_string()))?;

        Ok(Bytes::from(buf))
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// Little-Endian Helper Functions
// =============================================================================
//
// LSM containers are little-endian only, so unlike general TIFF there is no
// byte order switch. These helpers are used throughout the parser.

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a little-endian IEEE 754 double from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 8 bytes.
#[inline]
pub fn read_f64_le(bytes: &[u8]) -> f64 {
    f64::from_le_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}
