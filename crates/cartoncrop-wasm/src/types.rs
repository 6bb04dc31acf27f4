//! WASM-compatible wrapper types for pixel data.
//!
//! Wraps the core pixel type in a JavaScript-friendly interface, handling
//! the copy between WASM memory and JavaScript `Uint8Array`s.

use cartoncrop_core::decode::SourcePixels;
use wasm_bindgen::prelude::*;

/// Decoded RGB pixel data for JavaScript.
///
/// The pixel buffer lives in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`. Call `free()` to release a large buffer immediately, or
/// let wasm-bindgen's finalizer handle it.
#[wasm_bindgen]
pub struct JsSourcePixels {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsSourcePixels {
    /// Create from dimensions and RGB pixel data (3 bytes per pixel).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsSourcePixels {
        JsSourcePixels {
            width,
            height,
            pixels,
        }
    }

    /// Image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte length of the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Copy the RGB pixel data out as a Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsSourcePixels {
    /// Wrap core pixel data without copying.
    pub(crate) fn from_core(px: SourcePixels) -> Self {
        Self {
            width: px.width,
            height: px.height,
            pixels: px.pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_getters() {
        let px = JsSourcePixels::new(20, 10, vec![0u8; 20 * 10 * 3]);
        assert_eq!(px.width(), 20);
        assert_eq!(px.height(), 10);
        assert_eq!(px.byte_length(), 600);
    }

    #[test]
    fn test_from_core_keeps_buffer() {
        let core = SourcePixels::new(4, 2, vec![9u8; 4 * 2 * 3]);
        let js = JsSourcePixels::from_core(core.clone());
        assert_eq!(js.width(), 4);
        assert_eq!(js.pixels(), core.pixels);
    }
}
