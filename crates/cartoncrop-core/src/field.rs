//! Per-field image controller.
//!
//! An [`ImageField`] owns the whole lifecycle of one image-bearing form
//! field: validating a selection, running the interactive crop session,
//! rasterizing the committed crop, and holding the packaged output the
//! form will submit. Forms with several image fields hold one controller
//! per field; controllers never touch each other's state.
//!
//! Failures never propagate past the controller. Every error lands in the
//! field's error slot, where the enclosing form reads it; nothing here is
//! fatal to the page.

use thiserror::Error;

use crate::decode::{decode_source, preview_data_url, DecodeError, SourceImage};
use crate::output::{package_output, OutputImage, JPEG_MIME};
use crate::raster::{rasterize_to_jpeg, DEFAULT_JPEG_QUALITY};
use crate::session::CropSession;
use crate::validate::{validate_file, FileInfo, ValidationError};
use crate::TargetDimensions;

/// Errors surfaced through a field's error slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The selection was rejected by upload validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The selection passed validation but could not be decoded.
    #[error(transparent)]
    Unreadable(#[from] DecodeError),

    /// Rasterizing the committed crop produced no usable output.
    #[error("Could not crop the image. Please try again.")]
    RasterizationFailed,

    /// The field is required and has no value at submit time.
    #[error("*Image is required")]
    RequiredMissing,

    /// Save was requested without an open crop session.
    #[error("No crop session is open")]
    NoSession,
}

/// Static configuration for one image field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFieldConfig {
    /// Label used when the form aggregates per-field errors.
    pub label: String,
    /// Whether submit requires a value.
    pub required: bool,
    /// Exact output dimensions; also locks the crop aspect ratio.
    pub target: TargetDimensions,
}

impl ImageFieldConfig {
    pub fn new(label: impl Into<String>, required: bool, target: TargetDimensions) -> Self {
        Self {
            label: label.into(),
            required,
            target,
        }
    }
}

/// The logical owner of one image field's validation, crop, and output.
#[derive(Debug, Clone)]
pub struct ImageField {
    config: ImageFieldConfig,
    source: Option<SourceImage>,
    session: Option<CropSession>,
    preview: Option<String>,
    output: Option<OutputImage>,
    error: Option<FieldError>,
}

impl ImageField {
    pub fn new(config: ImageFieldConfig) -> Self {
        Self {
            config,
            source: None,
            session: None,
            preview: None,
            output: None,
            error: None,
        }
    }

    pub fn config(&self) -> &ImageFieldConfig {
        &self.config
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// The packaged upload value, if a save (or vector pass-through)
    /// has produced one.
    pub fn output(&self) -> Option<&OutputImage> {
        self.output.as_ref()
    }

    /// `data:` URL for the current preview, if any.
    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// The current error slot contents, if any.
    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    /// Whether an interactive crop session is open on this field.
    pub fn has_open_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&CropSession> {
        self.session.as_ref()
    }

    /// Mutable access to the open session, for pan/zoom interaction.
    pub fn session_mut(&mut self) -> Option<&mut CropSession> {
        self.session.as_mut()
    }

    /// Handle a new file selection on this field.
    ///
    /// Any crop session already open on the field is implicitly cancelled
    /// first; sessions on other fields are unaffected. A raster selection
    /// that passes validation opens a fresh crop session. A vector (SVG)
    /// selection is packaged immediately, without a session.
    ///
    /// # Errors
    ///
    /// Validation and decode failures are stored in the error slot and
    /// also returned. On [`ValidationError::FileTooLarge`] the field value
    /// is cleared so a stale oversized file can never be submitted; the
    /// caller must reset the underlying file-picker control.
    pub fn select_file(&mut self, info: FileInfo, bytes: &[u8]) -> Result<(), FieldError> {
        self.discard_session();

        if let Err(e) = validate_file(&info) {
            self.preview = None;
            self.output = None;
            let err = FieldError::from(e);
            self.error = Some(err.clone());
            return Err(err);
        }

        match decode_source(bytes, &info.mime) {
            Ok(pixels) => {
                let session = match CropSession::new(pixels.width, pixels.height, self.config.target)
                {
                    Ok(session) => session,
                    Err(e) => {
                        log::warn!("field {}: cannot open session: {e}", self.config.label);
                        let err = FieldError::Unreadable(DecodeError::Corrupted(e.to_string()));
                        self.error = Some(err.clone());
                        return Err(err);
                    }
                };
                self.preview = Some(preview_data_url(bytes, &info.mime));
                self.source = Some(SourceImage::new(info, pixels));
                self.session = Some(session);
                self.error = None;
                Ok(())
            }
            Err(DecodeError::VectorSource) => {
                // No raster pixels to crop; the file is the output
                self.preview = Some(preview_data_url(bytes, &info.mime));
                self.output = Some(package_output(bytes.to_vec(), info.name, info.mime));
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.preview = None;
                self.output = None;
                let err = FieldError::from(e);
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Commit the open crop session and store the packaged result.
    ///
    /// On success the output replaces any previous value, the preview
    /// switches to the cropped image, transient crop state is dropped,
    /// and the error slot clears (the field now has a value).
    ///
    /// # Errors
    ///
    /// `FieldError::NoSession` if no crop session is open, or
    /// `FieldError::RasterizationFailed` if encoding produced nothing - in
    /// the latter case the session stays open so the user can retry.
    pub fn save(&mut self) -> Result<(), FieldError> {
        let (Some(session), Some(source)) = (self.session.as_ref(), self.source.as_ref()) else {
            let err = FieldError::NoSession;
            self.error = Some(err.clone());
            return Err(err);
        };

        let region = session.commit();
        match rasterize_to_jpeg(&source.pixels, &region, self.config.target, DEFAULT_JPEG_QUALITY)
        {
            Ok(bytes) => {
                let name = source.file.name.clone();
                self.preview = Some(preview_data_url(&bytes, JPEG_MIME));
                self.output = Some(package_output(bytes, name, JPEG_MIME));
                self.discard_session();
                self.error = None;
                Ok(())
            }
            Err(e) => {
                log::warn!("field {}: rasterization failed: {e}", self.config.label);
                self.error = Some(FieldError::RasterizationFailed);
                Err(FieldError::RasterizationFailed)
            }
        }
    }

    /// Cancel the crop session and restore the field to its empty state.
    ///
    /// Drops the source, the session, the preview, any previous output,
    /// and the error slot. The caller must also clear the underlying
    /// file-picker control so the same filename can be re-selected.
    pub fn cancel(&mut self) {
        self.discard_session();
        self.preview = None;
        self.output = None;
        self.error = None;
    }

    /// Clear the field (the delete action on multi-image forms).
    pub fn clear(&mut self) {
        self.cancel();
    }

    /// Re-run the required-ness check, as at form submit time.
    ///
    /// # Errors
    ///
    /// `FieldError::RequiredMissing` when the field is required and has
    /// no output; the error is also stored in the slot.
    pub fn validate_required(&mut self) -> Result<(), FieldError> {
        if self.config.required && self.output.is_none() {
            let err = FieldError::RequiredMissing;
            self.error = Some(err.clone());
            return Err(err);
        }
        Ok(())
    }

    fn discard_session(&mut self) {
        self.session = None;
        self.source = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::MAX_FILE_SIZE;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
        });
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn slider_field() -> ImageField {
        ImageField::new(ImageFieldConfig::new(
            "Image",
            true,
            TargetDimensions::SLIDER,
        ))
    }

    fn info_for(bytes: &[u8]) -> FileInfo {
        FileInfo::new("photo.png", "image/png", bytes.len() as u64)
    }

    #[test]
    fn test_select_opens_session() {
        let mut field = slider_field();
        let bytes = png_bytes(1800, 800);
        field.select_file(info_for(&bytes), &bytes).unwrap();

        assert!(field.has_open_session());
        assert!(field.preview_url().unwrap().starts_with("data:image/png;base64,"));
        assert!(field.output().is_none());
        assert!(field.error().is_none());
    }

    #[test]
    fn test_oversized_file_rejected_before_session() {
        let mut field = slider_field();
        let info = FileInfo::new("big.png", "image/png", 5 * 1024 * 1024);

        let result = field.select_file(info, &[]);
        assert_eq!(
            result,
            Err(FieldError::Invalid(ValidationError::FileTooLarge {
                size: 5 * 1024 * 1024
            }))
        );
        assert!(!field.has_open_session());
        assert!(field.output().is_none());
        assert!(field.preview_url().is_none());
        assert!(field.error().is_some());
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let mut field = slider_field();
        let info = FileInfo::new("anim.gif", "image/gif", 1024);

        assert!(field.select_file(info, &[]).is_err());
        assert!(matches!(
            field.error(),
            Some(FieldError::Invalid(ValidationError::UnsupportedFormat(_)))
        ));
    }

    #[test]
    fn test_corrupt_file_rejected() {
        let mut field = slider_field();
        let info = FileInfo::new("broken.png", "image/png", 5);

        assert!(field.select_file(info, &[1, 2, 3, 4, 5]).is_err());
        assert!(matches!(field.error(), Some(FieldError::Unreadable(_))));
        assert!(!field.has_open_session());
    }

    #[test]
    fn test_save_produces_exact_target_jpeg() {
        let mut field = slider_field();
        let bytes = png_bytes(1800, 800);
        field.select_file(info_for(&bytes), &bytes).unwrap();
        field.save().unwrap();

        let output = field.output().unwrap();
        assert_eq!(output.name, "photo.png");
        assert_eq!(output.mime, "image/jpeg");

        let decoded = decode_source(&output.bytes, "image/jpeg").unwrap();
        assert_eq!((decoded.width, decoded.height), (900, 400));

        // Crop state is gone, preview shows the cropped result
        assert!(!field.has_open_session());
        assert!(field.preview_url().unwrap().starts_with("data:image/jpeg;base64,"));
        assert!(field.error().is_none());
    }

    #[test]
    fn test_zoomed_quadrant_crop_fills_target() {
        let mut field = ImageField::new(ImageFieldConfig::new(
            "Image 1",
            true,
            TargetDimensions::PRODUCT_THUMBNAIL,
        ));
        let bytes = png_bytes(2000, 1500);
        field.select_file(info_for(&bytes), &bytes).unwrap();

        // Crop the top-left quadrant: zoom 2, window centered on it
        let session = field.session_mut().unwrap();
        session.set_zoom(2.0);
        session.set_pan(500.0, 375.0);
        assert_eq!(
            session.region(),
            crate::session::CropRegion { x: 0, y: 0, width: 1000, height: 750 }
        );

        field.save().unwrap();
        let output = field.output().unwrap();
        assert_eq!(output.mime, "image/jpeg");
        let decoded = decode_source(&output.bytes, "image/jpeg").unwrap();
        assert_eq!((decoded.width, decoded.height), (1600, 1200));
    }

    #[test]
    fn test_save_without_session() {
        let mut field = slider_field();
        assert_eq!(field.save(), Err(FieldError::NoSession));
    }

    #[test]
    fn test_cancel_restores_empty_state() {
        let mut field = slider_field();
        let bytes = png_bytes(1800, 800);
        field.select_file(info_for(&bytes), &bytes).unwrap();
        field.save().unwrap();

        // Re-open a session, then cancel: prior output goes too
        field.select_file(info_for(&bytes), &bytes).unwrap();
        field.cancel();

        assert!(field.output().is_none());
        assert!(field.preview_url().is_none());
        assert!(field.error().is_none());
        assert!(!field.has_open_session());
    }

    #[test]
    fn test_new_selection_replaces_open_session() {
        let mut field = slider_field();
        let first = png_bytes(1800, 800);
        field.select_file(info_for(&first), &first).unwrap();
        let first_session = field.session().cloned();

        let second = png_bytes(2700, 1200);
        field
            .select_file(FileInfo::new("other.png", "image/png", second.len() as u64), &second)
            .unwrap();

        assert!(field.has_open_session());
        assert_ne!(field.session().cloned(), first_session);
    }

    #[test]
    fn test_selection_keeps_prior_output_until_save() {
        let mut field = slider_field();
        let bytes = png_bytes(1800, 800);
        field.select_file(info_for(&bytes), &bytes).unwrap();
        field.save().unwrap();
        let saved = field.output().cloned();

        // A new selection opens a session but the committed value stands
        field.select_file(info_for(&bytes), &bytes).unwrap();
        assert_eq!(field.output().cloned(), saved);
    }

    #[test]
    fn test_svg_pass_through() {
        let mut field = slider_field();
        let svg = b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_vec();
        let info = FileInfo::new("logo.svg", "image/svg+xml", svg.len() as u64);

        field.select_file(info, &svg).unwrap();

        assert!(!field.has_open_session());
        let output = field.output().unwrap();
        assert_eq!(output.mime, "image/svg+xml");
        assert_eq!(output.bytes, svg);
        assert_eq!(output.name, "logo.svg");
    }

    #[test]
    fn test_required_missing_at_submit() {
        let mut field = slider_field();
        assert_eq!(field.validate_required(), Err(FieldError::RequiredMissing));
        assert_eq!(field.error(), Some(&FieldError::RequiredMissing));
        assert_eq!(
            field.error().unwrap().to_string(),
            "*Image is required"
        );
    }

    #[test]
    fn test_required_satisfied_after_save() {
        let mut field = slider_field();
        let bytes = png_bytes(1800, 800);
        field.select_file(info_for(&bytes), &bytes).unwrap();
        field.save().unwrap();
        assert!(field.validate_required().is_ok());
    }

    #[test]
    fn test_optional_field_passes_empty() {
        let mut field = ImageField::new(ImageFieldConfig::new(
            "Icon",
            false,
            TargetDimensions::CATEGORY_ICON,
        ));
        assert!(field.validate_required().is_ok());
    }

    #[test]
    fn test_fields_are_independent() {
        let bytes = png_bytes(1600, 1200);
        let mut fields: Vec<ImageField> = (0..3)
            .map(|i| {
                ImageField::new(ImageFieldConfig::new(
                    format!("Image {}", i + 1),
                    true,
                    TargetDimensions::PRODUCT_THUMBNAIL,
                ))
            })
            .collect();

        for field in &mut fields {
            field
                .select_file(info_for(&bytes), &bytes)
                .unwrap();
        }
        fields[0].save().unwrap();
        fields[1].save().unwrap();
        fields[2].save().unwrap();
        let before: Vec<_> = [&fields[0], &fields[2]]
            .iter()
            .map(|f| f.output().cloned())
            .collect();

        // Re-crop and clear the middle field
        fields[1].select_file(info_for(&bytes), &bytes).unwrap();
        fields[1].save().unwrap();
        fields[1].clear();

        assert!(fields[1].output().is_none());
        assert_eq!(fields[0].output().cloned(), before[0]);
        assert_eq!(fields[2].output().cloned(), before[1]);
        assert!(fields[0].error().is_none());
        assert!(fields[2].error().is_none());
    }

    #[test]
    fn test_boundary_size_accepted() {
        let mut field = slider_field();
        let bytes = png_bytes(1800, 800);
        let mut info = info_for(&bytes);
        info.size = MAX_FILE_SIZE;
        assert!(field.select_file(info, &bytes).is_ok());
    }
}
