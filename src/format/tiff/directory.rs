//! Image directory resolution and the directory chain walk.
//!
//! A directory is read in two steps: first its field count, then the whole
//! record block including the trailing next-directory link. Each field is
//! then dispatched on its tag. Scalar fields are masked to their declared
//! width, list fields are resolved through [`ValueReader`], and the LSM info
//! field is parsed into [`LsmInfo`] on the spot.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::TiffError;
use crate::format::lsm::LsmInfo;
use crate::io::{read_u16_le, ByteSource};

use super::parser::{directory_size, IfdEntry, FIELD_COUNT_SIZE, FIELD_SIZE};
use super::tags::{TiffTag, SUBFILE_REDUCED_IMAGE_MASK};
use super::values::ValueReader;

// =============================================================================
// TIFF Defaults
// =============================================================================

/// Compression when the tag is absent (none)
const DEFAULT_COMPRESSION: u16 = 1;

/// Predictor when the tag is absent (none)
const DEFAULT_PREDICTOR: u16 = 1;

/// Samples per pixel when the tag is absent
const DEFAULT_SAMPLES_PER_PIXEL: u16 = 1;

/// Planar configuration when the tag is absent (chunky)
const DEFAULT_PLANAR_CONFIGURATION: u16 = 1;

// =============================================================================
// Directory
// =============================================================================

/// One resolved image directory.
///
/// Strip lists are kept exactly as stored. Their lengths are only checked
/// against each other when a strip is read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directory {
    /// Absolute offset this directory was read from
    pub offset: u64,
    pub new_subfile_type: u32,
    pub width: u32,
    pub height: u32,
    /// One entry per sample
    pub bits_per_sample: Vec<u16>,
    pub compression: u16,
    pub photometric_interpretation: u16,
    pub samples_per_pixel: u16,
    pub planar_configuration: u16,
    pub predictor: u16,
    pub strip_offsets: Vec<u32>,
    pub strip_byte_counts: Vec<u32>,
    pub lsm_info: Option<LsmInfo>,
}

impl Default for Directory {
    /// An empty directory carrying the TIFF defaults for absent tags.
    fn default() -> Self {
        Directory {
            offset: 0,
            new_subfile_type: 0,
            width: 0,
            height: 0,
            bits_per_sample: Vec::new(),
            compression: DEFAULT_COMPRESSION,
            photometric_interpretation: 0,
            samples_per_pixel: DEFAULT_SAMPLES_PER_PIXEL,
            planar_configuration: DEFAULT_PLANAR_CONFIGURATION,
            predictor: DEFAULT_PREDICTOR,
            strip_offsets: Vec::new(),
            strip_byte_counts: Vec::new(),
            lsm_info: None,
        }
    }
}

impl Directory {
    /// True for reduced-resolution copies (thumbnails).
    #[inline]
    pub fn is_thumbnail(&self) -> bool {
        self.new_subfile_type & SUBFILE_REDUCED_IMAGE_MASK != 0
    }

    /// Number of strips, as given by the offsets list.
    #[inline]
    pub fn strip_count(&self) -> usize {
        self.strip_offsets.len()
    }

    /// Read the directory at `offset`.
    ///
    /// Returns the directory and the offset of the next one (0 = none).
    pub fn read<S: ByteSource>(source: &S, offset: u64) -> Result<(Self, u16), TiffError> {
        let count_bytes = source.read_exact_at(offset, FIELD_COUNT_SIZE)?;
        let field_count = read_u16_le(&count_bytes);

        let bytes = source.read_exact_at(offset, directory_size(field_count))?;
        let fields_end = FIELD_COUNT_SIZE + field_count as usize * FIELD_SIZE;
        let next_offset = read_u16_le(&bytes[fields_end..fields_end + 2]);

        let values = ValueReader::new(source);
        let mut directory = Directory {
            offset,
            ..Default::default()
        };

        for record in bytes[FIELD_COUNT_SIZE..fields_end].chunks_exact(FIELD_SIZE) {
            let entry = IfdEntry::parse(record);
            let Some(tag) = entry.tag() else {
                continue;
            };

            match tag {
                TiffTag::NewSubfileType => directory.new_subfile_type = entry.scalar(),
                TiffTag::ImageWidth => directory.width = entry.scalar(),
                TiffTag::ImageLength => directory.height = entry.scalar(),
                TiffTag::Compression => directory.compression = entry.scalar() as u16,
                TiffTag::PhotometricInterpretation => {
                    directory.photometric_interpretation = entry.scalar() as u16
                }
                TiffTag::SamplesPerPixel => directory.samples_per_pixel = entry.scalar() as u16,
                TiffTag::PlanarConfiguration => {
                    directory.planar_configuration = entry.scalar() as u16
                }
                TiffTag::Predictor => directory.predictor = entry.scalar() as u16,
                TiffTag::BitsPerSample => {
                    directory.bits_per_sample = values.read_u16_list(&entry)?
                }
                TiffTag::StripOffsets => directory.strip_offsets = values.read_u32_list(&entry)?,
                TiffTag::StripByteCounts => {
                    directory.strip_byte_counts = values.read_u32_list(&entry)?
                }
                TiffTag::LsmInfo => {
                    directory.lsm_info = Some(LsmInfo::read(source, entry.offset(), entry.count)?)
                }
            }
        }

        debug!(
            offset,
            fields = field_count,
            width = directory.width,
            height = directory.height,
            strips = directory.strip_count(),
            next_offset,
            "Parsed directory"
        );

        Ok((directory, next_offset))
    }
}

/// Walk the directory chain starting at `first_offset`.
///
/// An offset of 0 ends the chain, so a first offset of 0 yields no
/// directories. A link back to an already visited directory is corruption.
pub fn read_directories<S: ByteSource>(
    source: &S,
    first_offset: u16,
) -> Result<Vec<Directory>, TiffError> {
    let mut directories = Vec::new();
    let mut visited = HashSet::new();
    let mut offset = first_offset;

    while offset != 0 {
        if !visited.insert(offset) {
            return Err(TiffError::DirectoryCycle(offset as u64));
        }

        let (directory, next_offset) = Directory::read(source, offset as u64)?;
        directories.push(directory);
        offset = next_offset;
    }

    Ok(directories)
}

// =============================================================================
// Tests
// =============================================================================
