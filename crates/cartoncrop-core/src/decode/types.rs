//! Core types for preview decoding.

use thiserror::Error;

use crate::validate::FileInfo;

/// Errors produced while decoding a selected file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bytes could not be decoded as an image.
    #[error("Corrupted or unreadable image file: {0}")]
    Corrupted(String),

    /// The file is a vector source (SVG) and has no raster pixels.
    #[error("Vector sources are packaged without cropping")]
    VectorSource,
}

/// Decoded RGB pixel data for one source image.
///
/// Pixels are stored row-major, 3 bytes per pixel. The buffer length is
/// always `width * height * 3`; dimensions reflect EXIF orientation for
/// JPEG sources, so they match what the preview surface displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePixels {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB pixel data, row-major, 3 bytes per pixel.
    pub pixels: Vec<u8>,
}

impl SourcePixels {
    /// Create pixel data from dimensions and a raw RGB buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap an `image::RgbImage`, taking ownership of its buffer.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// View as an `image::RgbImage` for resampling.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Width:height ratio of the decoded pixels.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }

    /// True when there is nothing to crop.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// A fully decoded source image: the selected file plus its pixels.
///
/// Created when a selection passes validation and decoding; discarded on
/// cancel or when a new file replaces it. Never outlives the form session.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// The selection this was decoded from.
    pub file: FileInfo,
    /// Orientation-corrected RGB pixels.
    pub pixels: SourcePixels,
}

impl SourceImage {
    pub fn new(file: FileInfo, pixels: SourcePixels) -> Self {
        Self { file, pixels }
    }
}
