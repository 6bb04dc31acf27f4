//! Product media collection bindings.
//!
//! `MediaCollectionHandle` exposes the ordered image/video entry
//! collection to the product form: add/remove/reorder, kind switching,
//! per-entry crop interaction, submit-time validation, and a snapshot of
//! the multipart parts to append.

use cartoncrop_core::media::{MediaCollection, MediaKind, MultipartPart};
use cartoncrop_core::validate::FileInfo;
use cartoncrop_core::TargetDimensions;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Snapshot of one multipart part for the submission step.
///
/// File parts carry `filename`/`mime`; the bytes are fetched separately
/// with `output_bytes(index)` to avoid serializing buffers through JSON.
#[derive(Debug, Serialize)]
struct PartSnapshot {
    /// Multipart key: `media[n]` or `media_url[n]`, 1-based.
    key: String,
    /// Zero-based entry position, for `output_bytes`.
    index: u32,
    /// `"file"` or `"url"`.
    kind: String,
    filename: Option<String>,
    mime: Option<String>,
    url: Option<String>,
}

/// Ordered collection of media entries for one product form.
#[wasm_bindgen]
pub struct MediaCollectionHandle {
    inner: MediaCollection,
}

#[wasm_bindgen]
impl MediaCollectionHandle {
    /// Create a collection with its fixed first entry (an image).
    #[wasm_bindgen(constructor)]
    pub fn new(target_width: u32, target_height: u32) -> MediaCollectionHandle {
        MediaCollectionHandle {
            inner: MediaCollection::new(TargetDimensions::new(target_width, target_height)),
        }
    }

    /// Number of entries.
    #[wasm_bindgen(getter)]
    pub fn len(&self) -> u32 {
        self.inner.len() as u32
    }

    /// Whether the collection has no entries.
    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Append a new image entry and return its position.
    ///
    /// # Errors
    ///
    /// Fails once the collection holds seven entries.
    pub fn push_entry(&mut self) -> Result<u32, JsValue> {
        self.inner
            .push_entry()
            .map(|i| i as u32)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Remove the entry at `index`; later entries shift down.
    ///
    /// # Errors
    ///
    /// The first entry is fixed and cannot be removed.
    pub fn remove_entry(&mut self, index: u32) -> Result<(), JsValue> {
        self.inner
            .remove_entry(index as usize)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Move an entry to a new position, shifting the ones between.
    ///
    /// # Errors
    ///
    /// The first entry is fixed; both positions must exist.
    pub fn reorder_entry(&mut self, from: u32, to: u32) -> Result<(), JsValue> {
        self.inner
            .reorder_entry(from as usize, to as usize)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Switch an entry between `"image"` and `"video"`, resetting its
    /// value.
    ///
    /// # Errors
    ///
    /// Unknown kind names and out-of-range positions.
    pub fn set_kind(&mut self, index: u32, kind: &str) -> Result<(), JsValue> {
        let kind = match kind {
            "image" => MediaKind::Image,
            "video" => MediaKind::Video,
            other => {
                return Err(JsValue::from_str(&format!("Unknown media kind: {other}")));
            }
        };
        self.inner
            .set_kind(index as usize, kind)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Store the video URL typed into a video entry.
    ///
    /// # Errors
    ///
    /// The entry must exist and be a video.
    pub fn set_video_url(&mut self, index: u32, url: &str) -> Result<(), JsValue> {
        self.inner
            .set_video_url(index as usize, url)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Handle a file selection on the image entry at `index`.
    ///
    /// # Errors
    ///
    /// Validation/decode failures, or a non-image entry.
    pub fn select_file(
        &mut self,
        index: u32,
        name: &str,
        mime: &str,
        size: f64,
        bytes: &[u8],
    ) -> Result<(), JsValue> {
        self.image_field(index)?
            .select_file(FileInfo::new(name, mime, size as u64), bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Set the zoom on the entry's open crop session.
    ///
    /// # Errors
    ///
    /// The entry must be an image.
    pub fn set_zoom(&mut self, index: u32, zoom: f64) -> Result<(), JsValue> {
        if let Some(session) = self.image_field(index)?.session_mut() {
            session.set_zoom(zoom);
        }
        Ok(())
    }

    /// Pan the entry's open crop session by a delta.
    ///
    /// # Errors
    ///
    /// The entry must be an image.
    pub fn pan_by(&mut self, index: u32, dx: f64, dy: f64) -> Result<(), JsValue> {
        if let Some(session) = self.image_field(index)?.session_mut() {
            session.pan_by(dx, dy);
        }
        Ok(())
    }

    /// Commit the crop on the entry at `index`.
    ///
    /// # Errors
    ///
    /// No open session, rasterization failure, or a non-image entry.
    /// Other entries are untouched either way.
    pub fn save(&mut self, index: u32) -> Result<(), JsValue> {
        self.image_field(index)?
            .save()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Cancel the crop session and clear the entry at `index`.
    ///
    /// # Errors
    ///
    /// The entry must be an image.
    pub fn cancel(&mut self, index: u32) -> Result<(), JsValue> {
        self.image_field(index)?.cancel();
        Ok(())
    }

    /// `data:` preview URL for the image entry at `index`, if any.
    pub fn preview_url(&self, index: u32) -> Option<String> {
        self.inner
            .entry(index as usize)?
            .image()?
            .preview_url()
            .map(str::to_string)
    }

    /// Error slot contents for the image entry at `index`, if any.
    pub fn error_message(&self, index: u32) -> Option<String> {
        self.inner
            .entry(index as usize)?
            .image()?
            .error()
            .map(|e| e.to_string())
    }

    /// Encoded bytes of the image entry's value, if any.
    pub fn output_bytes(&self, index: u32) -> Option<Vec<u8>> {
        self.inner
            .entry(index as usize)?
            .image()?
            .output()
            .map(|o| o.bytes.clone())
    }

    /// Run submit-time validation; returns one message per missing or
    /// invalid entry, for the form to aggregate into a single toast.
    pub fn validate_all(&mut self) -> Vec<String> {
        self.inner.validate_all()
    }

    /// Snapshot of the multipart parts to append, as an array of
    /// `{key, index, kind, filename, mime, url}` objects.
    ///
    /// # Errors
    ///
    /// Serialization failures only.
    pub fn parts(&self) -> Result<JsValue, JsValue> {
        let mut snapshots = Vec::new();

        // Positions of entries with values, aligned with multipart_parts
        let valued: Vec<u32> = self
            .inner
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| match entry {
                cartoncrop_core::media::MediaEntry::Image(field) => field.output().is_some(),
                cartoncrop_core::media::MediaEntry::Video { url } => !url.is_empty(),
            })
            .map(|(i, _)| i as u32)
            .collect();

        for (part, index) in self.inner.multipart_parts().into_iter().zip(valued) {
            snapshots.push(match part {
                MultipartPart::File { key, file } => PartSnapshot {
                    key,
                    index,
                    kind: "file".to_string(),
                    filename: Some(file.name.clone()),
                    mime: Some(file.mime.clone()),
                    url: None,
                },
                MultipartPart::Url { key, url } => PartSnapshot {
                    key,
                    index,
                    kind: "url".to_string(),
                    filename: None,
                    mime: None,
                    url: Some(url.to_string()),
                },
            });
        }

        serde_wasm_bindgen::to_value(&snapshots).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn image_field(
        &mut self,
        index: u32,
    ) -> Result<&mut cartoncrop_core::field::ImageField, JsValue> {
        self.inner
            .image_field_mut(index as usize)
            .ok_or_else(|| JsValue::from_str(&format!("No image entry at position {index}")))
    }
}
