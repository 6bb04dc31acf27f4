//! Upload validation.
//!
//! Gates a selected file before it enters the crop pipeline. A file is
//! checked against the accepted MIME types and the maximum upload size;
//! anything that fails here never reaches the decoder or the cropper.

use thiserror::Error;

/// Maximum accepted upload size in bytes (2 MiB, inclusive).
pub const MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// MIME types accepted by every image field.
pub const SUPPORTED_FORMATS: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/svg+xml",
    "image/webp",
];

/// Errors produced when a selected file is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The declared MIME type is not in the accepted set.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file exceeds the maximum upload size.
    #[error("File size is too large. Max 2MB.")]
    FileTooLarge { size: u64 },
}

/// A selected file as seen before decoding: name, declared type, byte size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Original filename, kept for output packaging.
    pub name: String,
    /// Declared MIME type (as reported by the file picker).
    pub mime: String,
    /// Size in bytes.
    pub size: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }
}

/// Check whether a MIME type is in the accepted set.
pub fn is_supported_format(mime: &str) -> bool {
    SUPPORTED_FORMATS.contains(&mime)
}

/// Check whether a MIME type names a vector source.
///
/// Vector sources pass validation but bypass the raster crop pipeline:
/// they are packaged as-is rather than resampled.
pub fn is_vector_format(mime: &str) -> bool {
    mime == "image/svg+xml"
}

/// Validate a selected file against format and size limits.
///
/// # Errors
///
/// Returns `ValidationError::UnsupportedFormat` if the declared MIME type
/// is not accepted, or `ValidationError::FileTooLarge` if the file exceeds
/// [`MAX_FILE_SIZE`]. On failure the caller must leave the field empty so
/// a stale oversized file is never submitted.
pub fn validate_file(info: &FileInfo) -> Result<(), ValidationError> {
    if !is_supported_format(&info.mime) {
        log::debug!("rejected {}: unsupported type {}", info.name, info.mime);
        return Err(ValidationError::UnsupportedFormat(info.mime.clone()));
    }

    if info.size > MAX_FILE_SIZE {
        log::debug!("rejected {}: {} bytes over limit", info.name, info.size);
        return Err(ValidationError::FileTooLarge { size: info.size });
    }

    Ok(())
}
