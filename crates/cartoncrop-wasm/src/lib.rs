//! Cartoncrop WASM - WebAssembly bindings for Cartoncrop
//!
//! This crate exposes the cartoncrop-core pipeline to the admin
//! application's JavaScript forms.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for decoded pixel data
//! - `validate` - Upload validation bindings
//! - `decode` - Preview decoding bindings
//! - `session` - Standalone crop-session bindings (pan/zoom/region)
//! - `field` - Per-field controller driving the whole pipeline
//! - `media` - Product media collection bindings
//! - `auth` - Admin session state backed by localStorage
//!
//! # Usage
//!
//! ```typescript
//! import init, { ImageFieldHandle } from '@cartoncrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const field = new ImageFieldHandle('Image', true, 900, 400);
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! field.select_file(file.name, file.type, file.size, bytes);
//! ```

use wasm_bindgen::prelude::*;

mod auth;
mod decode;
mod field;
mod media;
mod session;
mod types;
mod validate;

// Re-export public types
pub use auth::{AdminSessionHandle, LocalStorageStore};
pub use decode::{decode_source, preview_data_url};
pub use field::ImageFieldHandle;
pub use media::MediaCollectionHandle;
pub use session::CropSessionHandle;
pub use types::JsSourcePixels;
pub use validate::{is_supported_format, max_file_size, validate_file};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
