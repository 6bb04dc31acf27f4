//! Fixed-dimension rasterization.
//!
//! This module renders a committed crop rectangle into a new image of the
//! field's exact output dimensions:
//! - Copying the crop rectangle out of the decoded source
//! - Resampling the copy to fill the output exactly (no letterboxing)
//! - Encoding the result as JPEG for upload
//!
//! The output dimensions are a per-field constant, so the work is bounded
//! (worst case 1600x1200) and runs synchronously on the calling thread.

mod jpeg;
mod resample;

use thiserror::Error;

pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use resample::{extract_region, rasterize};

use crate::decode::SourcePixels;
use crate::session::CropRegion;
use crate::TargetDimensions;

/// Errors produced while rasterizing a committed crop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// The crop rectangle is empty or extends outside the source bounds.
    #[error("Crop region lies outside the source image")]
    RegionOutOfBounds,

    /// The configured output dimensions are zero in one or both axes.
    #[error("Invalid output dimensions: {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },

    /// The source pixel buffer does not match its declared dimensions.
    #[error("Source pixel buffer does not match its dimensions")]
    CorruptSource,

    /// The JPEG encoder reported a failure.
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// The encoder ran but produced zero bytes.
    #[error("Encoder produced no output")]
    EmptyOutput,
}

/// Rasterize a committed crop and encode it as an upload-ready JPEG.
///
/// Combines [`rasterize`] and [`encode_jpeg`]: the crop rectangle is
/// resampled to exactly `target` and encoded at the given quality.
///
/// # Errors
///
/// Propagates any [`RasterError`] from the two steps. On error the caller
/// is expected to keep its crop session open so the user can retry.
pub fn rasterize_to_jpeg(
    source: &SourcePixels,
    region: &CropRegion,
    target: TargetDimensions,
    quality: u8,
) -> Result<Vec<u8>, RasterError> {
    let output = rasterize(source, region, target)?;
    encode_jpeg(&output, quality)
}
