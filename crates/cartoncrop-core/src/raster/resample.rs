//! Crop extraction and exact-dimension resampling.

use super::RasterError;
use crate::decode::SourcePixels;
use crate::session::CropRegion;
use crate::TargetDimensions;

/// Copy a crop rectangle out of the source pixels.
///
/// The rectangle must be non-empty and fully inside the source bounds;
/// the crop session guarantees this for regions it committed, but regions
/// arriving over the WASM boundary are re-checked here.
///
/// # Errors
///
/// Returns `RasterError::RegionOutOfBounds` if the rectangle is empty or
/// extends past the source, and `RasterError::CorruptSource` if the pixel
/// buffer does not match the source dimensions.
pub fn extract_region(
    source: &SourcePixels,
    region: &CropRegion,
) -> Result<SourcePixels, RasterError> {
    if source.pixels.len() != (source.width as usize) * (source.height as usize) * 3 {
        return Err(RasterError::CorruptSource);
    }
    if !region.fits_within(source.width, source.height) {
        return Err(RasterError::RegionOutOfBounds);
    }

    let src_stride = source.width as usize * 3;
    let row_bytes = region.width as usize * 3;
    let mut out = Vec::with_capacity(region.height as usize * row_bytes);

    for row in region.y..region.y + region.height {
        let start = row as usize * src_stride + region.x as usize * 3;
        out.extend_from_slice(&source.pixels[start..start + row_bytes]);
    }

    Ok(SourcePixels::new(region.width, region.height, out))
}

/// Render a crop rectangle into a new image of exactly `target` pixels.
///
/// The rectangle is copied out of the source and resampled to fill the
/// output completely. The crop session already locked the rectangle to
/// the target aspect ratio, so no letterboxing or further aspect
/// correction happens here.
///
/// Bilinear sampling is used, matching what a browser canvas does when
/// drawing a scaled sub-region.
///
/// # Errors
///
/// Returns `RasterError::InvalidTarget` for zero output dimensions, plus
/// anything [`extract_region`] reports.
pub fn rasterize(
    source: &SourcePixels,
    region: &CropRegion,
    target: TargetDimensions,
) -> Result<SourcePixels, RasterError> {
    if !target.is_valid() {
        return Err(RasterError::InvalidTarget {
            width: target.width,
            height: target.height,
        });
    }

    let cropped = extract_region(source, region)?;

    // Already at the output size, nothing to resample
    if cropped.width == target.width && cropped.height == target.height {
        return Ok(cropped);
    }

    let rgb = cropped.to_rgb_image().ok_or(RasterError::CorruptSource)?;
    let resized = image::imageops::resize(
        &rgb,
        target.width,
        target.height,
        image::imageops::FilterType::Triangle,
    );

    Ok(SourcePixels::from_rgb_image(resized))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
