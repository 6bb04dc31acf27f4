//! Interactive crop-session state.
//!
//! A [`CropSession`] tracks the pan position and zoom level the user is
//! manipulating and derives the crop rectangle in source pixel space. The
//! aspect ratio is fixed for the lifetime of the session, taken from the
//! field's configured output dimensions.
//!
//! # Geometry
//!
//! At zoom 1 the crop window is the largest aspect-correct rectangle that
//! fits inside the source; zooming divides the window size by the zoom
//! factor. The window is addressed by its center point, and every pan or
//! zoom change re-clamps the center so the window can never extend outside
//! the source bounds.
//!
//! A session ends in one of two ways: [`CropSession::commit`] hands the
//! final rectangle to the rasterizer, or the owning field simply drops the
//! session on cancel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TargetDimensions;

/// Upper zoom limit. The lower limit is always 1 (the full window).
pub const MAX_ZOOM: f64 = 5.0;

/// Errors produced when opening a crop session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The decoded source has no pixels to crop.
    #[error("Source image is empty")]
    EmptySource,

    /// The configured output dimensions are zero in one or both axes.
    #[error("Invalid output dimensions: {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },
}

/// A crop rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Left edge in source pixels.
    pub x: u32,
    /// Top edge in source pixels.
    pub y: u32,
    /// Width in source pixels.
    pub width: u32,
    /// Height in source pixels.
    pub height: u32,
}

impl CropRegion {
    /// Check that the region is non-empty and fully inside the given bounds.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some_and(|r| r <= width)
            && self.y.checked_add(self.height).is_some_and(|b| b <= height)
    }

    /// Width:height ratio of the region.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

/// Pan/zoom state for one in-flight crop.
///
/// Exactly one session exists per image field at a time; selecting a new
/// file while a session is open replaces it. Sessions on other fields are
/// independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSession {
    src_width: f64,
    src_height: f64,
    target: TargetDimensions,
    zoom: f64,
    center_x: f64,
    center_y: f64,
}

impl CropSession {
    /// Open a session over a source of the given decoded dimensions,
    /// centered at zoom 1.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptySource` if either source dimension is
    /// zero and `SessionError::InvalidTarget` if either output dimension
    /// is zero.
    pub fn new(
        src_width: u32,
        src_height: u32,
        target: TargetDimensions,
    ) -> Result<Self, SessionError> {
        if src_width == 0 || src_height == 0 {
            return Err(SessionError::EmptySource);
        }
        if !target.is_valid() {
            return Err(SessionError::InvalidTarget {
                width: target.width,
                height: target.height,
            });
        }

        let mut session = Self {
            src_width: src_width as f64,
            src_height: src_height as f64,
            target,
            zoom: 1.0,
            center_x: src_width as f64 / 2.0,
            center_y: src_height as f64 / 2.0,
        };
        session.clamp_center();
        Ok(session)
    }

    /// The output dimensions this session is locked to.
    pub fn target(&self) -> TargetDimensions {
        self.target
    }

    /// Current zoom level, always in `1.0..=MAX_ZOOM`.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan position: the crop window's center in source pixels.
    pub fn pan(&self) -> (f64, f64) {
        (self.center_x, self.center_y)
    }

    /// Set the zoom level, clamping to `1.0..=MAX_ZOOM`.
    ///
    /// Zooming out grows the window, which may force the center back
    /// toward the middle of the source; the pan position is re-clamped.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(1.0, MAX_ZOOM)
        } else {
            1.0
        };
        self.clamp_center();
    }

    /// Move the crop window center to an absolute source position.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.center_x = if x.is_finite() { x } else { self.center_x };
        self.center_y = if y.is_finite() { y } else { self.center_y };
        self.clamp_center();
    }

    /// Move the crop window center by a delta in source pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.set_pan(self.center_x + dx, self.center_y + dy);
    }

    /// The crop rectangle derived from the current pan and zoom.
    ///
    /// The rectangle is always fully contained in the source bounds and
    /// matches the target aspect ratio up to one pixel of rounding. Each
    /// dimension is at least 1 pixel.
    pub fn region(&self) -> CropRegion {
        let (window_w, window_h) = self.window_size();

        let width = (window_w.round() as u32).clamp(1, self.src_width as u32);
        let height = (window_h.round() as u32).clamp(1, self.src_height as u32);

        let max_x = self.src_width as u32 - width;
        let max_y = self.src_height as u32 - height;
        let x = ((self.center_x - window_w / 2.0).round().max(0.0) as u32).min(max_x);
        let y = ((self.center_y - window_h / 2.0).round().max(0.0) as u32).min(max_y);

        CropRegion {
            x,
            y,
            width,
            height,
        }
    }

    /// Finalize the session, yielding the rectangle to rasterize.
    pub fn commit(&self) -> CropRegion {
        let region = self.region();
        log::debug!(
            "crop committed: {}x{}+{}+{} at zoom {:.2}",
            region.width,
            region.height,
            region.x,
            region.y,
            self.zoom
        );
        region
    }

    /// Crop window size in source pixels for the current zoom.
    fn window_size(&self) -> (f64, f64) {
        let aspect = self.target.aspect_ratio();

        // Largest aspect-correct window that fits the source at zoom 1
        let (base_w, base_h) = if self.src_width / self.src_height > aspect {
            (self.src_height * aspect, self.src_height)
        } else {
            (self.src_width, self.src_width / aspect)
        };

        (base_w / self.zoom, base_h / self.zoom)
    }

    /// Keep the window center where the window stays inside the source.
    fn clamp_center(&mut self) {
        let (window_w, window_h) = self.window_size();
        let half_w = window_w / 2.0;
        let half_h = window_h / 2.0;

        self.center_x = self.center_x.clamp(half_w, self.src_width - half_w);
        self.center_y = self.center_y.clamp(half_h, self.src_height - half_h);
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
