//! Container handle for LSM files.
//!
//! [`LsmFile`] parses the header and the whole directory chain up front and
//! keeps the byte source for later strip reads. Parsing is all-or-nothing:
//! any failure while walking the chain discards every directory read so far.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, info};

use crate::error::TiffError;
use crate::format::lsm::{ChannelColor, LsmInfo};
use crate::format::strip::{read_strip, StripData};
use crate::format::tiff::{read_directories, Compression, Directory, LsmHeader, HEADER_SIZE};
use crate::io::{ByteSource, FileSource};

/// A parsed LSM file.
pub struct LsmFile<S: ByteSource> {
    source: S,
    header: LsmHeader,
    directories: Vec<Directory>,
}

impl LsmFile<FileSource> {
    /// Open and parse the file at `path`.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, TiffError> {
        Self::open(FileSource::open(path)?)
    }
}

impl<S: ByteSource> LsmFile<S> {
    /// Validate the header and parse every directory in the chain.
    pub fn open(source: S) -> Result<Self, TiffError> {
        let size = source.size();
        if size < HEADER_SIZE as u64 {
            return Err(TiffError::FileTooSmall {
                required: HEADER_SIZE as u64,
                actual: size,
            });
        }

        let header_bytes = source.read_exact_at(0, HEADER_SIZE)?;
        let header = LsmHeader::parse(&header_bytes)?;
        debug!(
            source = source.identifier(),
            first_directory = header.first_ifd_offset,
            "Parsed LSM header"
        );

        let directories = read_directories(&source, header.first_ifd_offset)?;

        info!(
            source = source.identifier(),
            directories = directories.len(),
            "Opened LSM file"
        );

        Ok(LsmFile {
            source,
            header,
            directories,
        })
    }

    pub fn header(&self) -> &LsmHeader {
        &self.header
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// All directories in chain order.
    pub fn directories(&self) -> &[Directory] {
        &self.directories
    }

    /// Directory `index`, in chain order.
    pub fn directory(&self, index: usize) -> Result<&Directory, TiffError> {
        self.directories
            .get(index)
            .ok_or(TiffError::DirectoryIndexOutOfRange {
                index,
                count: self.directories.len(),
            })
    }

    /// Full-resolution image planes, skipping thumbnails.
    pub fn images(&self) -> impl Iterator<Item = &Directory> + '_ {
        self.directories.iter().filter(|d| !d.is_thumbnail())
    }

    /// The plane metadata block of the first directory that carries one.
    pub fn lsm_info(&self) -> Option<&LsmInfo> {
        self.directories.iter().find_map(|d| d.lsm_info.as_ref())
    }

    /// Decompressed bytes of strip `strip` in directory `directory`.
    ///
    /// Horizontal differencing is not undone; use [`Self::read_strip_data`]
    /// when absolute sample values are needed.
    pub fn read_strip(&self, directory: usize, strip: usize) -> Result<Bytes, TiffError> {
        read_strip(&self.source, self.directory(directory)?, strip)
    }

    /// Decompressed strip bytes along with the predictor still applied.
    pub fn read_strip_data(&self, directory: usize, strip: usize) -> Result<StripData, TiffError> {
        StripData::read(&self.source, self.directory(directory)?, strip)
    }

    /// Human-readable description of every directory.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl<S: ByteSource> fmt::Display for LsmFile<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, dir) in self.directories.iter().enumerate() {
            writeln!(f, "Directory {}", index)?;
            writeln!(
                f,
                "  Type: {}",
                if dir.is_thumbnail() { "thumbnail" } else { "full image" }
            )?;
            writeln!(f, "  Width: {}", dir.width)?;
            writeln!(f, "  Height: {}", dir.height)?;

            let compression_name = Compression::from_u16(dir.compression)
                .map(Compression::name)
                .unwrap_or("unknown");
            writeln!(f, "  Compression: {} ({})", dir.compression, compression_name)?;
            writeln!(f, "  Strips: {}", dir.strip_count())?;

            if let Some(info) = &dir.lsm_info {
                writeln!(f, "  Data type: {}", info.intensity_data_type)?;
            }

            if !dir.bits_per_sample.is_empty() {
                let bits: Vec<String> = dir.bits_per_sample.iter().map(u16::to_string).collect();
                writeln!(f, "  Bits per sample: {}", bits.join(" "))?;
            }

            // A directory without a channel table has zero colors and zero
            // names, so it still gets an empty color section
            let labeled: Option<Vec<(ChannelColor, &str)>> =
                match dir.lsm_info.as_ref().and_then(|info| info.channels.as_ref()) {
                    Some(channels) => channels.labeled_colors().map(Iterator::collect),
                    None => Some(Vec::new()),
                };
            if let Some(labeled) = labeled {
                writeln!(f, "  Colors:")?;
                for (color, name) in labeled {
                    writeln!(f, "    {} ({})", color, name)?;
                }
            }

            writeln!(f)?;
        }
        Ok(())
    }
}

impl<S: ByteSource> fmt::Debug for LsmFile<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LsmFile")
            .field("source", &self.source.identifier())
            .field("header", &self.header)
            .field("directories", &self.directories.len())
            .finish()
    }
}
