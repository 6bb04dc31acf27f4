//! Raster decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, SourcePixels};
use crate::validate::is_vector_format;

/// Decode a validated upload into orientation-corrected RGB pixels.
///
/// Phone-camera JPEGs commonly carry an EXIF orientation tag instead of
/// rotated pixel data. The browser preview honors that tag, so the decoded
/// bounds must honor it too or the crop rectangle would be computed against
/// a sideways image.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes
/// * `mime` - The declared MIME type of the selection
///
/// # Errors
///
/// Returns `DecodeError::VectorSource` for SVG input (callers package
/// those without cropping) and `DecodeError::Corrupted` when the bytes
/// cannot be decoded as an image.
pub fn decode_source(bytes: &[u8], mime: &str) -> Result<SourcePixels, DecodeError> {
    if is_vector_format(mime) {
        return Err(DecodeError::VectorSource);
    }

    let orientation = exif_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    let rgb = apply_orientation(img, orientation).into_rgb8();

    log::debug!("decoded {} source: {}x{}", mime, rgb.width(), rgb.height());

    Ok(SourcePixels::from_rgb_image(rgb))
}

/// Read the EXIF orientation value (1-8) from the file, if any.
///
/// Missing or unreadable EXIF data yields 1 (no transformation).
fn exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1),
        Err(_) => 1,
    }
}

/// Apply an EXIF orientation value to decoded pixels.
///
/// Values 5-8 swap width and height. Out-of-range values are treated as 1.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a small gradient PNG for decode tests.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let bytes = png_bytes(40, 30);
        let px = decode_source(&bytes, "image/png").unwrap();
        assert_eq!(px.width, 40);
        assert_eq!(px.height, 30);
        assert_eq!(px.pixels.len(), 40 * 30 * 3);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_source(&[0, 1, 2, 3, 4], "image/png");
        assert!(matches!(result, Err(DecodeError::Corrupted(_))));
    }

    #[test]
    fn test_decode_empty_fails() {
        assert!(decode_source(&[], "image/jpeg").is_err());
    }

    #[test]
    fn test_decode_svg_reports_vector() {
        let result = decode_source(b"<svg></svg>", "image/svg+xml");
        assert_eq!(result, Err(DecodeError::VectorSource));
    }

    #[test]
    fn test_decode_ignores_declared_type_mismatch() {
        // The picker's declared type can lie; decoding goes by content
        let bytes = png_bytes(10, 10);
        let px = decode_source(&bytes, "image/jpeg").unwrap();
        assert_eq!(px.width, 10);
    }

    #[test]
    fn test_orientation_default_without_exif() {
        // PNGs have no EXIF container
        assert_eq!(exif_orientation(&png_bytes(4, 4)), 1);
        assert_eq!(exif_orientation(&[]), 1);
    }

    #[test]
    fn test_apply_orientation_swaps_dimensions() {
        let img = DynamicImage::new_rgb8(40, 20);
        for value in [5, 6, 7, 8] {
            let out = apply_orientation(img.clone(), value).into_rgb8();
            assert_eq!(out.width(), 20, "orientation {value} should swap");
            assert_eq!(out.height(), 40);
        }
        for value in [0, 1, 2, 3, 4, 9] {
            let out = apply_orientation(img.clone(), value).into_rgb8();
            assert_eq!(out.width(), 40, "orientation {value} should not swap");
        }
    }
}
