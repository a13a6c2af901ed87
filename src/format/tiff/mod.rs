//! TIFF container layer of LSM files.
//!
//! LSM files are classic TIFF with a few restrictions and one proprietary tag.
//!
//! # Key Concepts
//!
//! - **Byte order**: Only little-endian ("II") files are valid. Big-endian
//!   files are rejected at the header.
//!
//! - **Short offsets**: The header's first-directory offset and each
//!   directory's next-directory link are 16-bit values.
//!
//! - **Directory**: One image plane (full resolution or thumbnail) with its
//!   strip tables and, for full-resolution planes, the CZ_LSMINFO block.
//!
//! - **Inline vs offset values**: A single value is stored in the field
//!   record itself; any list of two or more is stored at an offset.

mod directory;
mod parser;
mod tags;
mod values;

pub use directory::{read_directories, Directory};
pub use parser::{directory_size, IfdEntry, LsmHeader, FIELD_SIZE, HEADER_SIZE};
pub use tags::{Compression, FieldType, Predictor, TiffTag, SUBFILE_REDUCED_IMAGE_MASK};
pub use values::{parse_u32_array, ValueReader};
