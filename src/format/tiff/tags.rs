//! TIFF tag and field type definitions.
//!
//! Only the vocabulary that appears in LSM containers is defined here.
//! Anything else is skipped during parsing.

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two Longs: numerator and denominator (8 bytes)
    Rational = 5,

    /// Undefined byte data (1 byte per element)
    Undefined = 7,
}

impl FieldType {
    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte => 1,
            FieldType::Ascii => 1,
            FieldType::Short => 2,
            FieldType::Long => 4,
            FieldType::Rational => 8,
            FieldType::Undefined => 1,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for unsupported or unknown type values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            7 => Some(FieldType::Undefined),
            _ => None,
        }
    }

    /// Mask keeping the bytes an inline scalar of this type occupies.
    #[inline]
    pub const fn scalar_mask(self) -> u32 {
        match self.size_in_bytes() {
            1 => 0xFF,
            2 => 0xFFFF,
            _ => 0xFFFF_FFFF,
        }
    }
}

// =============================================================================
// TIFF Tags
// =============================================================================

/// Tag IDs that appear in LSM image directories.
///
/// Tags not listed here are ignored during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TiffTag {
    /// Kind of data in this subfile (bit 0 set = reduced-resolution copy)
    NewSubfileType = 0x00FE,

    /// Image width in pixels
    ImageWidth = 0x0100,

    /// Image height (length) in pixels
    ImageLength = 0x0101,

    /// Bits per sample, one entry per channel
    BitsPerSample = 0x0102,

    /// Compression scheme used
    Compression = 0x0103,

    /// Color space of the image data
    PhotometricInterpretation = 0x0106,

    /// Byte offset of each strip
    StripOffsets = 0x0111,

    /// Number of components per pixel
    SamplesPerPixel = 0x0115,

    /// Compressed byte count of each strip
    StripByteCounts = 0x0117,

    /// How components are organized (chunky vs planar)
    PlanarConfiguration = 0x011C,

    /// Transform applied to samples before compression
    Predictor = 0x013D,

    /// Zeiss CZ_LSMINFO block
    LsmInfo = 0x866C,
}

impl TiffTag {
    /// Create a TiffTag from its numeric value.
    ///
    /// Returns `None` for unrecognized tags. Unknown tags are not an error;
    /// they are simply ignored during parsing.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x00FE => Some(TiffTag::NewSubfileType),
            0x0100 => Some(TiffTag::ImageWidth),
            0x0101 => Some(TiffTag::ImageLength),
            0x0102 => Some(TiffTag::BitsPerSample),
            0x0103 => Some(TiffTag::Compression),
            0x0106 => Some(TiffTag::PhotometricInterpretation),
            0x0111 => Some(TiffTag::StripOffsets),
            0x0115 => Some(TiffTag::SamplesPerPixel),
            0x0117 => Some(TiffTag::StripByteCounts),
            0x011C => Some(TiffTag::PlanarConfiguration),
            0x013D => Some(TiffTag::Predictor),
            0x866C => Some(TiffTag::LsmInfo),
            _ => None,
        }
    }

    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Compression Values
// =============================================================================

/// TIFF compression scheme identifiers seen in LSM files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Compression {
    /// No compression
    None = 1,

    /// LZW compression
    Lzw = 5,
}

impl Compression {
    /// Create a Compression from its numeric value.
    ///
    /// Returns `None` for values this reader does not know.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Compression::None),
            5 => Some(Compression::Lzw),
            _ => None,
        }
    }

    /// Get a human-readable name for the compression scheme.
    pub const fn name(self) -> &'static str {
        match self {
            Compression::None => "None",
            Compression::Lzw => "LZW",
        }
    }
}

// =============================================================================
// Predictor Values
// =============================================================================

/// TIFF predictor identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Predictor {
    /// Samples stored as-is
    None = 1,

    /// Each sample stored as the difference from its left neighbour
    HorizontalDifferencing = 2,
}

impl Predictor {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Predictor::None),
            2 => Some(Predictor::HorizontalDifferencing),
            _ => None,
        }
    }
}

/// Bit 0 of NewSubfileType: this image is a reduced-resolution copy.
pub const SUBFILE_REDUCED_IMAGE_MASK: u32 = 1;

// =============================================================================
// Tests
// =============================================================================
