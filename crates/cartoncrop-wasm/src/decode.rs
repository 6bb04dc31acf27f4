//! Preview decoding bindings.

use cartoncrop_core::decode;
use wasm_bindgen::prelude::*;

use crate::types::JsSourcePixels;

/// Decode a validated upload into orientation-corrected RGB pixels.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array`
/// * `mime` - The declared MIME type of the selection
///
/// # Errors
///
/// Returns an error for corrupted data and for vector (SVG) sources,
/// which have no raster pixels and are packaged without cropping.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const pixels = decode_source(bytes, file.type);
/// console.log(`Decoded ${pixels.width}x${pixels.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_source(bytes: &[u8], mime: &str) -> Result<JsSourcePixels, JsValue> {
    decode::decode_source(bytes, mime)
        .map(JsSourcePixels::from_core)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Build a `data:` URL from raw file bytes for inline preview display.
#[wasm_bindgen]
pub fn preview_data_url(bytes: &[u8], mime: &str) -> String {
    decode::preview_data_url(bytes, mime)
}
