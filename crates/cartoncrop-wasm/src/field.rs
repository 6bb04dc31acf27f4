//! Per-field controller bindings.
//!
//! `ImageFieldHandle` drives the whole pipeline for one image field:
//! validation, crop session interaction, save/cancel, and access to the
//! packaged output for multipart submission.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const field = new ImageFieldHandle('Image', true, 900, 400);
//!
//! input.onchange = async (e) => {
//!   const file = e.target.files[0];
//!   const bytes = new Uint8Array(await file.arrayBuffer());
//!   try {
//!     field.select_file(file.name, file.type, file.size, bytes);
//!     showCropper(field.preview_url);
//!   } catch (err) {
//!     input.value = null; // oversized or unsupported selection
//!   }
//! };
//!
//! saveButton.onclick = () => {
//!   field.save();
//!   formData.append('image', new File([field.output_bytes()], field.output_name, {
//!     type: field.output_mime,
//!   }));
//! };
//! ```

use cartoncrop_core::field::{ImageField, ImageFieldConfig};
use cartoncrop_core::validate::FileInfo;
use cartoncrop_core::TargetDimensions;
use wasm_bindgen::prelude::*;

/// One image field's validation, crop, and output lifecycle.
#[wasm_bindgen]
pub struct ImageFieldHandle {
    inner: ImageField,
}

#[wasm_bindgen]
impl ImageFieldHandle {
    /// Create a controller for a field with the given label, required
    /// flag, and exact output dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(label: &str, required: bool, target_width: u32, target_height: u32) -> ImageFieldHandle {
        ImageFieldHandle {
            inner: ImageField::new(ImageFieldConfig::new(
                label,
                required,
                TargetDimensions::new(target_width, target_height),
            )),
        }
    }

    /// Handle a new file selection.
    ///
    /// Implicitly cancels any crop session already open on this field.
    /// Raster selections open a fresh session; SVG selections become the
    /// field value immediately.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message for validation and decode
    /// failures. The same message is kept in `error_message`. After a
    /// size failure the caller must clear the file input element.
    pub fn select_file(
        &mut self,
        name: &str,
        mime: &str,
        size: f64,
        bytes: &[u8],
    ) -> Result<(), JsValue> {
        self.inner
            .select_file(FileInfo::new(name, mime, size as u64), bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Whether an interactive crop session is open.
    #[wasm_bindgen(getter)]
    pub fn has_open_session(&self) -> bool {
        self.inner.has_open_session()
    }

    /// Set the zoom level on the open session. No-op without a session.
    pub fn set_zoom(&mut self, zoom: f64) {
        if let Some(session) = self.inner.session_mut() {
            session.set_zoom(zoom);
        }
    }

    /// Move the crop window center by a delta. No-op without a session.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if let Some(session) = self.inner.session_mut() {
            session.pan_by(dx, dy);
        }
    }

    /// Move the crop window center to an absolute position.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        if let Some(session) = self.inner.session_mut() {
            session.set_pan(x, y);
        }
    }

    /// The current crop rectangle as `{x, y, width, height}`, or
    /// `undefined` when no session is open.
    ///
    /// # Errors
    ///
    /// Serialization failures only.
    pub fn region(&self) -> Result<JsValue, JsValue> {
        match self.inner.session() {
            Some(session) => serde_wasm_bindgen::to_value(&session.region())
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Commit the crop and store the packaged JPEG as the field value.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message when no session is open or
    /// rasterization fails; in the latter case the session stays open
    /// for a retry.
    pub fn save(&mut self) -> Result<(), JsValue> {
        self.inner
            .save()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Cancel the crop session and empty the field. The caller must
    /// also clear the file input element.
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }

    /// Clear the field (the delete action on multi-image forms).
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Re-run the required-ness check, as at form submit time.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message when the field is required and
    /// empty.
    pub fn validate_required(&mut self) -> Result<(), JsValue> {
        self.inner
            .validate_required()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `data:` URL for the current preview, if any.
    #[wasm_bindgen(getter)]
    pub fn preview_url(&self) -> Option<String> {
        self.inner.preview_url().map(str::to_string)
    }

    /// The current error slot contents, if any.
    #[wasm_bindgen(getter)]
    pub fn error_message(&self) -> Option<String> {
        self.inner.error().map(|e| e.to_string())
    }

    /// Whether the field has a committed value.
    #[wasm_bindgen(getter)]
    pub fn has_output(&self) -> bool {
        self.inner.output().is_some()
    }

    /// Encoded bytes of the field value, if any. Copies into JS memory.
    pub fn output_bytes(&self) -> Option<Vec<u8>> {
        self.inner.output().map(|o| o.bytes.clone())
    }

    /// Filename for the multipart part, if a value exists.
    #[wasm_bindgen(getter)]
    pub fn output_name(&self) -> Option<String> {
        self.inner.output().map(|o| o.name.clone())
    }

    /// MIME type of the field value, if a value exists.
    #[wasm_bindgen(getter)]
    pub fn output_mime(&self) -> Option<String> {
        self.inner.output().map(|o| o.mime.clone())
    }
}
