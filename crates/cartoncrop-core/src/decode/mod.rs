//! Preview decoding for selected uploads.
//!
//! This module turns a validated upload into something the cropper can
//! work with:
//! - Decoding PNG/JPEG/WebP bytes into RGB pixel data
//! - Applying EXIF orientation so crop bounds match the on-screen preview
//! - Building `data:` URLs for the interactive preview surface
//!
//! Vector sources (SVG) are detected and reported as such; they skip the
//! raster pipeline entirely and are packaged without cropping.
//!
//! All operations are synchronous and single-threaded; the decoders run
//! in the browser via WASM bindings or on the host in tests.

mod preview;
mod reader;
mod types;

pub use preview::preview_data_url;
pub use reader::decode_source;
pub use types::{DecodeError, SourceImage, SourcePixels};
