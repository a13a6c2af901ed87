//! Horizontal differencing reversal.
//!
//! Strips compressed with predictor 2 store each sample as the difference
//! from the same component of the pixel to its left. [`read_strip`] only
//! undoes the LZW layer; pixel consumers call into this module to recover
//! absolute sample values.
//!
//! Rows are independent: the first pixel of every row is stored as-is.
//! Sums wrap at the sample width, matching the encoder's wrapping
//! subtraction. Multi-byte samples are accumulated as whole little-endian
//! integers so carries propagate between bytes.
//!
//! [`read_strip`]: super::strip::read_strip

use crate::error::TiffError;
use crate::format::tiff::Directory;

/// Planar configuration value for component-separated strips
const PLANAR_SEPARATE: u16 = 2;

/// Row geometry needed to undo differencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// Samples per row, across all interleaved components
    pub row_samples: usize,
    /// Distance in samples between the same component of neighbouring pixels
    pub stride: usize,
    pub bits_per_sample: u16,
}

impl RowLayout {
    /// Derive the layout of a directory's strips.
    ///
    /// Planar-separate strips hold one component each, so their stride is 1.
    pub fn for_directory(directory: &Directory) -> Self {
        let stride = if directory.planar_configuration == PLANAR_SEPARATE {
            1
        } else {
            directory.samples_per_pixel.max(1) as usize
        };
        RowLayout {
            row_samples: directory.width as usize * stride,
            stride,
            bits_per_sample: directory.bits_per_sample.first().copied().unwrap_or(8),
        }
    }
}

/// Undo horizontal differencing in place.
///
/// A trailing partial row is processed like a full one. Only 8-bit and
/// 16-bit samples are supported.
pub fn reverse_horizontal_differencing(
    data: &mut [u8],
    layout: RowLayout,
) -> Result<(), TiffError> {
    if layout.row_samples == 0 || layout.stride == 0 {
        return Ok(());
    }

    match layout.bits_per_sample {
        8 => {
            for row in data.chunks_mut(layout.row_samples) {
                for i in layout.stride..row.len() {
                    row[i] = row[i].wrapping_add(row[i - layout.stride]);
                }
            }
        }
        16 => {
            for row in data.chunks_mut(layout.row_samples * 2) {
                let samples = row.len() / 2;
                for i in layout.stride..samples {
                    let prev = (i - layout.stride) * 2;
                    let curr = i * 2;
                    let sum = u16::from_le_bytes([row[curr], row[curr + 1]])
                        .wrapping_add(u16::from_le_bytes([row[prev], row[prev + 1]]));
                    row[curr..curr + 2].copy_from_slice(&sum.to_le_bytes());
                }
            }
        }
        other => return Err(TiffError::UnsupportedBitDepth(other)),
    }

    Ok(())
}
