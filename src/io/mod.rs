//! Positioned byte sources.
//!
//! Every parser in this crate reads through [`ByteSource`], so the same code
//! handles files on disk and in-memory buffers.

mod source;

pub use source::{read_f64_le, read_u16_le, read_u32_le, ByteSource, FileSource, MemorySource};
