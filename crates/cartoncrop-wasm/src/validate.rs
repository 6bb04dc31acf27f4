//! Upload validation bindings.

use cartoncrop_core::validate::{self, FileInfo, MAX_FILE_SIZE};
use wasm_bindgen::prelude::*;

/// Check whether a MIME type is accepted by the image fields.
///
/// # Example (TypeScript)
///
/// ```typescript
/// if (!is_supported_format(file.type)) {
///   // reject before reading the file at all
/// }
/// ```
#[wasm_bindgen]
pub fn is_supported_format(mime: &str) -> bool {
    validate::is_supported_format(mime)
}

/// The maximum accepted upload size in bytes (2 MiB).
#[wasm_bindgen]
pub fn max_file_size() -> f64 {
    MAX_FILE_SIZE as f64
}

/// Validate a selection against the format and size limits.
///
/// # Arguments
///
/// * `name` - The filename (`file.name`)
/// * `mime` - The declared MIME type (`file.type`)
/// * `size` - The byte size (`file.size`)
///
/// # Errors
///
/// Returns the user-facing validation message as a `JsValue` string. On
/// the size error the caller must also clear the file input element.
#[wasm_bindgen]
pub fn validate_file(name: &str, mime: &str, size: f64) -> Result<(), JsValue> {
    let info = FileInfo::new(name, mime, size as u64);
    validate::validate_file(&info).map_err(|e| JsValue::from_str(&e.to_string()))
}
