//! Cartoncrop Core - Image capture and crop pipeline
//!
//! This crate provides the image handling used by the CartonBoxGuru admin
//! forms: upload validation, preview decoding, interactive crop-session
//! state, fixed-dimension rasterization, and output packaging, along with
//! the media-field collection and admin session state that sit around them.

pub mod auth;
pub mod decode;
pub mod field;
pub mod media;
pub mod output;
pub mod raster;
pub mod session;
pub mod validate;

pub use field::{FieldError, ImageField, ImageFieldConfig};
pub use output::{package_output, OutputImage};
pub use session::{CropRegion, CropSession};

/// Fixed output dimensions for one image field.
///
/// Every image-bearing form field is configured with the exact pixel
/// dimensions its upload must have. The same value locks the aspect ratio
/// used during interactive cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TargetDimensions {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

impl TargetDimensions {
    /// Category and deal-category icons (3:2).
    pub const CATEGORY_ICON: TargetDimensions = TargetDimensions {
        width: 300,
        height: 200,
    };

    /// Home page slider banners (9:4).
    pub const SLIDER: TargetDimensions = TargetDimensions {
        width: 900,
        height: 400,
    };

    /// Product media thumbnails (4:3).
    pub const PRODUCT_THUMBNAIL: TargetDimensions = TargetDimensions {
        width: 1600,
        height: 1200,
    };

    /// Create target dimensions from explicit width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The locked width:height ratio enforced while cropping.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Check that both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
