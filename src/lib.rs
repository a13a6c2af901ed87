//! # LSM Reader
//!
//! A reader for Zeiss LSM confocal microscopy files and the LZW codec their
//! pixel strips are compressed with.
//!
//! LSM is a little-endian TIFF variant. Each image plane is a directory of
//! tagged fields; full-resolution planes additionally carry a CZ_LSMINFO
//! block with acquisition metadata and per-channel names and colors.
//!
//! ## Architecture
//!
//! - [`io`] - Positioned byte sources (files and in-memory buffers)
//! - [`lzw`] - Variable-width (9-15 bit) LZW encoder and decoder
//! - [`mod@format`] - Header, directory, plane metadata and strip parsing
//! - [`reader`] - The [`LsmFile`] container handle
//! - [`config`] - CLI types for the `lsm-inspect` binary
//!
//! ## Example
//!
//! ```rust,no_run
//! use lsm_reader::LsmFile;
//!
//! let file = LsmFile::open_path("stack.lsm")?;
//! for (index, dir) in file.directories().iter().enumerate() {
//!     println!("{}: {}x{}, {} strips", index, dir.width, dir.height, dir.strip_count());
//! }
//!
//! // Decompressed bytes; horizontal differencing is still applied
//! let strip = file.read_strip(0, 0)?;
//!
//! // Absolute sample values
//! let samples = file.read_strip_data(0, 0)?.into_samples()?;
//! # let _ = (strip, samples);
//! # Ok::<(), lsm_reader::TiffError>(())
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod lzw;
pub mod reader;

// Re-export commonly used types
pub use error::{ErrorKind, IoError, LzwError, TiffError};
pub use format::lsm::{ChannelColor, ChannelTable, Dimensions, LsmInfo};
pub use format::predictor::{reverse_horizontal_differencing, RowLayout};
pub use format::tiff::{Compression, Directory, FieldType, LsmHeader, Predictor, TiffTag};
pub use format::{read_strip, StripData};
pub use io::{ByteSource, FileSource, MemorySource};
pub use reader::LsmFile;
