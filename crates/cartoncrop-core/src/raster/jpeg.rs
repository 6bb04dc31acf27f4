//! JPEG encoding for upload output.
//!
//! Cropped output is always re-encoded as JPEG before packaging,
//! regardless of the source format. The quality default mirrors what the
//! upload forms have always produced.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::RasterError;
use crate::decode::SourcePixels;

/// Quality used when a field does not specify one.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode rasterized pixels to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - The rasterized output image
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Errors
///
/// Returns `RasterError::InvalidTarget` for zero dimensions,
/// `RasterError::CorruptSource` for a mismatched pixel buffer,
/// `RasterError::EncodingFailed` if the encoder reports an error, and
/// `RasterError::EmptyOutput` if it silently produces no bytes. The last
/// case leaves the crop session open so the user can retry the save.
pub fn encode_jpeg(pixels: &SourcePixels, quality: u8) -> Result<Vec<u8>, RasterError> {
    if pixels.width == 0 || pixels.height == 0 {
        return Err(RasterError::InvalidTarget {
            width: pixels.width,
            height: pixels.height,
        });
    }

    let expected = (pixels.width as usize) * (pixels.height as usize) * 3;
    if pixels.pixels.len() != expected {
        return Err(RasterError::CorruptSource);
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(
            &pixels.pixels,
            pixels.width,
            pixels.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| RasterError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    if bytes.is_empty() {
        return Err(RasterError::EmptyOutput);
    }

    Ok(bytes)
}
