use thiserror::Error;

/// Coarse classification of every error this crate produces.
///
/// Callers that only need to decide "unreadable, skip this file" versus
/// "readable but not supported" can match on this instead of the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Seek/read failure or truncated source
    Io,
    /// Structural corruption: bad magic, inconsistent lengths, bad LZW stream
    Format,
    /// Recognized but unimplemented compression/predictor combination
    Unsupported,
}

/// I/O errors that can occur when reading from a byte source
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Requested range exceeds source bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// Underlying seek or read failed
    #[error("Read error on {identifier}: {message}")]
    Read { identifier: String, message: String },
}

/// Errors raised by the LZW decoder
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LzwError {
    /// Code refers to a dictionary entry that has not been assigned yet
    #[error("Invalid LZW code {code}: only {next_code} codes assigned")]
    InvalidCode { code: u32, next_code: u32 },

    /// Code width grew past the 16-bit ceiling
    #[error("LZW code width overflow: {0} bits")]
    CodeWidthOverflow(u8),
}

/// Errors that can occur when parsing an LSM container
#[derive(Debug, Clone, Error)]
pub enum TiffError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Strip payload failed to decompress
    #[error("LZW error: {0}")]
    Lzw(#[from] LzwError),

    /// Byte order marker is not "II"
    #[error("Invalid byte order marker: expected 0x4949 (II), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Version constant is not 42
    #[error("Invalid TIFF version: expected 42, got {0}")]
    InvalidVersion(u16),

    /// Source is too small to contain a header
    #[error("File too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: u64, actual: u64 },

    /// Directory chain points back at an already visited directory
    #[error("Directory chain loops back to offset {0}")]
    DirectoryCycle(u64),

    /// List field carries a type code we cannot size
    #[error("Unknown field type {field_type} for tag 0x{tag:04X}")]
    UnknownFieldType { tag: u16, field_type: u16 },

    /// Plane metadata field is smaller than the fixed header
    #[error("LSM info block too short: {actual} bytes, need at least {required}")]
    InfoTooShort { required: u64, actual: u64 },

    /// Plane metadata code constant mismatch
    #[error("Invalid LSM info code: expected 0x494C, got 0x{0:04X}")]
    InvalidInfoCode(u16),

    /// Plane metadata version constant mismatch
    #[error("Invalid LSM info version: 0x{0:04X}")]
    InvalidInfoVersion(u16),

    /// Plane metadata declared length disagrees with the directory field
    #[error("LSM info length mismatch: block declares {declared} bytes, field declares {field}")]
    InfoLengthMismatch { declared: u32, field: u32 },

    /// Channel name length prefix exceeds the sanity bound
    #[error("Channel name {index} too long: {length} bytes (max {max})")]
    NameTooLong { index: usize, length: u32, max: u32 },

    /// Strip index outside the directory's strip list
    #[error("Strip {index} out of range ({count} strips)")]
    StripIndexOutOfRange { index: usize, count: usize },

    /// Strip offsets and byte counts lists have different lengths
    #[error("Strip list mismatch: {offsets} offsets but {byte_counts} byte counts")]
    StripCountMismatch { offsets: usize, byte_counts: usize },

    /// Directory index outside the parsed directory list
    #[error("Directory {index} out of range ({count} directories)")]
    DirectoryIndexOutOfRange { index: usize, count: usize },

    /// Predictor reversal requested for a sample width it does not handle
    #[error("Unsupported bits per sample for predictor: {0}")]
    UnsupportedBitDepth(u16),

    /// Compression/predictor combination this reader does not decode
    #[error("Unsupported compression {compression} with predictor {predictor}")]
    UnsupportedCompression { compression: u16, predictor: u16 },
}

impl TiffError {
    /// Classify this error into one of the three error kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TiffError::Io(_) => ErrorKind::Io,
            TiffError::UnsupportedCompression { .. } | TiffError::UnsupportedBitDepth(_) => {
                ErrorKind::Unsupported
            }
            _ => ErrorKind::Format,
        }
    }
}
