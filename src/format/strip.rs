//! Pixel strip reading.
//!
//! A strip is located by its entries in the directory's offset and byte
//! count lists. Uncompressed strips are returned verbatim; LZW strips written
//! with horizontal differencing are decompressed. Differencing itself is left
//! in place: see [`StripData`] and [`super::predictor`].

use bytes::Bytes;
use tracing::debug;

use crate::error::TiffError;
use crate::io::ByteSource;
use crate::lzw;

use super::predictor::{reverse_horizontal_differencing, RowLayout};
use super::tiff::{Compression, Directory, Predictor};

/// Read and decompress strip `index` of `directory`.
///
/// # Errors
/// - `StripIndexOutOfRange` if `index` is past the offsets list
/// - `StripCountMismatch` if the offsets and byte counts lists differ in length
/// - `Io` if the strip extends past the end of the source
/// - `Lzw` if the compressed payload is corrupt
/// - `UnsupportedCompression` for any compression other than none, or LZW
///   with horizontal differencing
pub fn read_strip<S: ByteSource>(
    source: &S,
    directory: &Directory,
    index: usize,
) -> Result<Bytes, TiffError> {
    let count = directory.strip_offsets.len();
    if index >= count {
        return Err(TiffError::StripIndexOutOfRange { index, count });
    }
    if count != directory.strip_byte_counts.len() {
        return Err(TiffError::StripCountMismatch {
            offsets: count,
            byte_counts: directory.strip_byte_counts.len(),
        });
    }

    let offset = directory.strip_offsets[index] as u64;
    let byte_count = directory.strip_byte_counts[index] as usize;

    let compression = Compression::from_u16(directory.compression);
    let predictor = Predictor::from_u16(directory.predictor);

    match (compression, predictor) {
        (Some(Compression::None), _) => Ok(source.read_exact_at(offset, byte_count)?),
        (Some(Compression::Lzw), Some(Predictor::HorizontalDifferencing)) => {
            let compressed = source.read_exact_at(offset, byte_count)?;
            let decoded = lzw::decode(&compressed)?;
            debug!(
                index,
                compressed = byte_count,
                decoded = decoded.len(),
                "Decoded LZW strip"
            );
            Ok(Bytes::from(decoded))
        }
        _ => Err(TiffError::UnsupportedCompression {
            compression: directory.compression,
            predictor: directory.predictor,
        }),
    }
}

// =============================================================================
// StripData
// =============================================================================

/// Decompressed strip bytes together with the predictor still applied.
///
/// This is the handoff point between the container reader and pixel
/// consumers: `bytes` carries horizontal differences whenever `predictor`
/// is 2, and [`StripData::into_samples`] turns them into absolute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripData {
    pub bytes: Bytes,
    pub predictor: u16,
    layout: RowLayout,
}

impl StripData {
    /// Read strip `index` and remember how its rows are laid out.
    pub fn read<S: ByteSource>(
        source: &S,
        directory: &Directory,
        index: usize,
    ) -> Result<Self, TiffError> {
        Ok(StripData {
            bytes: read_strip(source, directory, index)?,
            predictor: directory.predictor,
            layout: RowLayout::for_directory(directory),
        })
    }

    /// True if the bytes still carry horizontal differences.
    #[inline]
    pub fn is_differenced(&self) -> bool {
        Predictor::from_u16(self.predictor) == Some(Predictor::HorizontalDifferencing)
    }

    /// Absolute sample bytes, with differencing undone where present.
    pub fn into_samples(self) -> Result<Vec<u8>, TiffError> {
        let mut samples = self.bytes.to_vec();
        if self.is_differenced() {
            reverse_horizontal_differencing(&mut samples, self.layout)?;
        }
        Ok(samples)
    }
}

// =============================================================================
// Tests
// =============================================================================
