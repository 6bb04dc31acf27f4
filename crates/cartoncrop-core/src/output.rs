//! Output packaging.
//!
//! Every field controller produces its upload value through the same
//! factory, so the named file-like object has one definition instead of
//! being assembled ad hoc at each call site.

/// MIME type given to re-encoded raster output.
pub const JPEG_MIME: &str = "image/jpeg";

/// An upload-ready image: encoded bytes plus the name and type the
/// multipart request will carry.
///
/// Exclusively owned by the form field that produced it; each save fully
/// replaces the previous value, and clearing the field drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputImage {
    /// Filename for the multipart part, taken from the original selection.
    pub name: String,
    /// MIME type of the encoded bytes.
    pub mime: String,
    /// The encoded image bytes.
    pub bytes: Vec<u8>,
}

impl OutputImage {
    /// Size of the encoded payload in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Package encoded bytes as a named upload value.
///
/// Raster crops pass [`JPEG_MIME`] here; vector pass-through keeps the
/// original type. The filename is always the original selection's name -
/// repeated saves of the same field reuse it, which is fine because each
/// save replaces the previous output entirely.
pub fn package_output(
    bytes: Vec<u8>,
    filename: impl Into<String>,
    mime: impl Into<String>,
) -> OutputImage {
    OutputImage {
        name: filename.into(),
        mime: mime.into(),
        bytes,
    }
}
