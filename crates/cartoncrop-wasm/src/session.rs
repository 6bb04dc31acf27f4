//! Standalone crop-session bindings.
//!
//! Exposes the pan/zoom state machine directly, for preview surfaces
//! that track the crop rectangle themselves. Most forms drive the full
//! pipeline through `ImageFieldHandle` instead.

use cartoncrop_core::session::CropSession;
use cartoncrop_core::TargetDimensions;
use wasm_bindgen::prelude::*;

/// A crop session over a decoded source, locked to a target aspect.
#[wasm_bindgen]
pub struct CropSessionHandle {
    inner: CropSession,
}

#[wasm_bindgen]
impl CropSessionHandle {
    /// Open a session, centered at zoom 1.
    ///
    /// # Arguments
    ///
    /// * `src_width` / `src_height` - Decoded source dimensions
    /// * `target_width` / `target_height` - The field's output dimensions
    ///
    /// # Errors
    ///
    /// Returns an error when the source is empty or the target has a
    /// zero dimension.
    #[wasm_bindgen(constructor)]
    pub fn new(
        src_width: u32,
        src_height: u32,
        target_width: u32,
        target_height: u32,
    ) -> Result<CropSessionHandle, JsValue> {
        CropSession::new(
            src_width,
            src_height,
            TargetDimensions::new(target_width, target_height),
        )
        .map(|inner| CropSessionHandle { inner })
        .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current zoom level (1 to 5).
    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.zoom()
    }

    /// Crop window center, x coordinate in source pixels.
    #[wasm_bindgen(getter)]
    pub fn pan_x(&self) -> f64 {
        self.inner.pan().0
    }

    /// Crop window center, y coordinate in source pixels.
    #[wasm_bindgen(getter)]
    pub fn pan_y(&self) -> f64 {
        self.inner.pan().1
    }

    /// Set the zoom level; out-of-range values are clamped.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.inner.set_zoom(zoom);
    }

    /// Move the crop window center to an absolute position.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.inner.set_pan(x, y);
    }

    /// Move the crop window center by a delta in source pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.inner.pan_by(dx, dy);
    }

    /// The current crop rectangle as `{x, y, width, height}`.
    ///
    /// # Errors
    ///
    /// Serialization failures only.
    pub fn region(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.region())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_handle_rejects_empty_source() {
        assert!(CropSessionHandle::new(0, 0, 900, 400).is_err());
    }

    #[wasm_bindgen_test]
    fn test_region_serializes() {
        let handle = CropSessionHandle::new(1800, 800, 900, 400).unwrap();
        assert!(handle.region().is_ok());
    }
}
