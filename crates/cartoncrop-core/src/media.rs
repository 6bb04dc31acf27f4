//! Product media collection.
//!
//! The product form carries up to seven media entries, each either a
//! cropped image or a video URL. Entries form an explicit ordered
//! collection addressed by position; each image entry owns its own
//! [`ImageField`] controller, so crop sessions on different positions
//! never interfere.

use thiserror::Error;

use crate::field::{ImageField, ImageFieldConfig};
use crate::output::OutputImage;
use crate::TargetDimensions;

/// Maximum number of media entries on one product.
pub const MAX_MEDIA_ENTRIES: usize = 7;

/// Errors produced by collection operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// The collection already holds the maximum number of entries.
    #[error("A maximum of 7 media entries is allowed")]
    CapacityReached,

    /// The first media entry is fixed and cannot be removed.
    #[error("The first media entry cannot be removed")]
    FirstEntryFixed,

    /// No entry exists at the given position.
    #[error("No media entry at position {0}")]
    NoSuchEntry(usize),
}

/// What an entry currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MediaKind {
    Image,
    Video,
}

/// One media entry: a cropped image or a video URL.
#[derive(Debug, Clone)]
pub enum MediaEntry {
    Image(ImageField),
    Video { url: String },
}

impl MediaEntry {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaEntry::Image(_) => MediaKind::Image,
            MediaEntry::Video { .. } => MediaKind::Video,
        }
    }

    /// The image controller, when this entry is an image.
    pub fn image(&self) -> Option<&ImageField> {
        match self {
            MediaEntry::Image(field) => Some(field),
            MediaEntry::Video { .. } => None,
        }
    }

    /// The video URL, when this entry is a video.
    pub fn video_url(&self) -> Option<&str> {
        match self {
            MediaEntry::Image(_) => None,
            MediaEntry::Video { url } => Some(url),
        }
    }
}

/// A value ready to be appended to the multipart submission body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartPart<'a> {
    /// A file part: `media[n]` carrying a cropped image.
    File { key: String, file: &'a OutputImage },
    /// A text part: `media_url[n]` carrying a video URL.
    Url { key: String, url: &'a str },
}

/// Ordered collection of media entries for one product form.
#[derive(Debug, Clone)]
pub struct MediaCollection {
    target: TargetDimensions,
    entries: Vec<MediaEntry>,
}

impl MediaCollection {
    /// Create a collection with its fixed first entry (an image).
    pub fn new(target: TargetDimensions) -> Self {
        Self {
            target,
            entries: vec![MediaEntry::Image(Self::image_field(target, 1))],
        }
    }

    fn image_field(target: TargetDimensions, position: usize) -> ImageField {
        ImageField::new(ImageFieldConfig::new(
            format!("Image {position}"),
            true,
            target,
        ))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&MediaEntry> {
        self.entries.get(index)
    }

    /// Append a new image entry.
    ///
    /// # Errors
    ///
    /// `MediaError::CapacityReached` once the collection holds
    /// [`MAX_MEDIA_ENTRIES`] entries.
    pub fn push_entry(&mut self) -> Result<usize, MediaError> {
        if self.entries.len() >= MAX_MEDIA_ENTRIES {
            return Err(MediaError::CapacityReached);
        }
        let position = self.entries.len() + 1;
        self.entries
            .push(MediaEntry::Image(Self::image_field(self.target, position)));
        Ok(self.entries.len() - 1)
    }

    /// Remove the entry at `index`; later entries shift down in order.
    ///
    /// # Errors
    ///
    /// `MediaError::FirstEntryFixed` for index 0 and
    /// `MediaError::NoSuchEntry` past the end.
    pub fn remove_entry(&mut self, index: usize) -> Result<(), MediaError> {
        if index == 0 {
            return Err(MediaError::FirstEntryFixed);
        }
        if index >= self.entries.len() {
            return Err(MediaError::NoSuchEntry(index));
        }
        self.entries.remove(index);
        Ok(())
    }

    /// Move an entry to a new position, shifting the ones between.
    ///
    /// # Errors
    ///
    /// `MediaError::FirstEntryFixed` when either position is 0 and
    /// `MediaError::NoSuchEntry` when either is past the end.
    pub fn reorder_entry(&mut self, from: usize, to: usize) -> Result<(), MediaError> {
        if from == 0 || to == 0 {
            return Err(MediaError::FirstEntryFixed);
        }
        if from >= self.entries.len() {
            return Err(MediaError::NoSuchEntry(from));
        }
        if to >= self.entries.len() {
            return Err(MediaError::NoSuchEntry(to));
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        Ok(())
    }

    /// Switch an entry between image and video, resetting its value.
    ///
    /// Switching to the kind the entry already has is a no-op and keeps
    /// its state.
    ///
    /// # Errors
    ///
    /// `MediaError::NoSuchEntry` when the position is past the end.
    pub fn set_kind(&mut self, index: usize, kind: MediaKind) -> Result<(), MediaError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(MediaError::NoSuchEntry(index))?;

        if entry.kind() == kind {
            return Ok(());
        }

        *entry = match kind {
            MediaKind::Image => MediaEntry::Image(Self::image_field(self.target, index + 1)),
            MediaKind::Video => MediaEntry::Video { url: String::new() },
        };
        Ok(())
    }

    /// Mutable access to the image controller at `index`, if that entry
    /// is an image.
    pub fn image_field_mut(&mut self, index: usize) -> Option<&mut ImageField> {
        match self.entries.get_mut(index) {
            Some(MediaEntry::Image(field)) => Some(field),
            _ => None,
        }
    }

    /// Set the video URL on a video entry.
    ///
    /// The value is stored as typed; well-formedness is checked at submit
    /// time by [`MediaCollection::validate_all`].
    ///
    /// # Errors
    ///
    /// `MediaError::NoSuchEntry` when the position is past the end or the
    /// entry is not a video.
    pub fn set_video_url(&mut self, index: usize, url: impl Into<String>) -> Result<(), MediaError> {
        match self.entries.get_mut(index) {
            Some(MediaEntry::Video { url: slot }) => {
                *slot = url.into();
                Ok(())
            }
            _ => Err(MediaError::NoSuchEntry(index)),
        }
    }

    /// Run submit-time validation over every entry.
    ///
    /// Returns one message per missing or invalid entry, labelled by
    /// position, for the form to aggregate into a single notification.
    pub fn validate_all(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            let position = index + 1;
            match entry {
                MediaEntry::Image(field) => {
                    if field.validate_required().is_err() {
                        messages.push(format!("Image {position} is required*"));
                    }
                }
                MediaEntry::Video { url } => {
                    if url.is_empty() {
                        messages.push(format!("Youtube {position} is required*"));
                    } else if !is_valid_video_url(url) {
                        messages.push(format!("Youtube {position} must be a valid URL"));
                    }
                }
            }
        }
        messages
    }

    /// The parts to append to the multipart submission body.
    ///
    /// Keys are 1-based: `media[1]`.. for files, `media_url[1]`.. for
    /// video URLs, matching the backend contract. Entries without a value
    /// are skipped.
    pub fn multipart_parts(&self) -> Vec<MultipartPart<'_>> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let position = index + 1;
                match entry {
                    MediaEntry::Image(field) => field.output().map(|file| MultipartPart::File {
                        key: format!("media[{position}]"),
                        file,
                    }),
                    MediaEntry::Video { url } if !url.is_empty() => Some(MultipartPart::Url {
                        key: format!("media_url[{position}]"),
                        url,
                    }),
                    MediaEntry::Video { .. } => None,
                }
            })
            .collect()
    }
}

/// Check that a video URL is an absolute http(s) URL with a host.
fn is_valid_video_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or("");
            !host.is_empty() && !url.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::FileInfo;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 32])
        });
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn collection() -> MediaCollection {
        MediaCollection::new(TargetDimensions::PRODUCT_THUMBNAIL)
    }

    fn crop_into(collection: &mut MediaCollection, index: usize, bytes: &[u8]) {
        let field = collection.image_field_mut(index).unwrap();
        field
            .select_file(FileInfo::new("media.png", "image/png", bytes.len() as u64), bytes)
            .unwrap();
        field.save().unwrap();
    }

    #[test]
    fn test_starts_with_one_image_entry() {
        let c = collection();
        assert_eq!(c.len(), 1);
        assert_eq!(c.entry(0).unwrap().kind(), MediaKind::Image);
    }

    #[test]
    fn test_capacity_capped_at_seven() {
        let mut c = collection();
        for _ in 1..MAX_MEDIA_ENTRIES {
            c.push_entry().unwrap();
        }
        assert_eq!(c.len(), 7);
        assert_eq!(c.push_entry(), Err(MediaError::CapacityReached));
    }

    #[test]
    fn test_first_entry_cannot_be_removed() {
        let mut c = collection();
        c.push_entry().unwrap();
        assert_eq!(c.remove_entry(0), Err(MediaError::FirstEntryFixed));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_remove_shifts_later_entries_down() {
        let mut c = collection();
        c.push_entry().unwrap(); // 1
        c.push_entry().unwrap(); // 2
        c.set_kind(1, MediaKind::Video).unwrap();
        c.set_video_url(1, "https://youtube.com/watch?v=a").unwrap();
        c.set_kind(2, MediaKind::Video).unwrap();
        c.set_video_url(2, "https://youtube.com/watch?v=b").unwrap();

        c.remove_entry(1).unwrap();

        assert_eq!(c.len(), 2);
        // The old entry 2 is now entry 1, value intact
        assert_eq!(
            c.entry(1).unwrap().video_url(),
            Some("https://youtube.com/watch?v=b")
        );
    }

    #[test]
    fn test_remove_past_end() {
        let mut c = collection();
        assert_eq!(c.remove_entry(5), Err(MediaError::NoSuchEntry(5)));
    }

    #[test]
    fn test_reorder_preserves_values() {
        let mut c = collection();
        c.push_entry().unwrap();
        c.push_entry().unwrap();
        c.set_kind(1, MediaKind::Video).unwrap();
        c.set_video_url(1, "https://youtu.be/one").unwrap();
        c.set_kind(2, MediaKind::Video).unwrap();
        c.set_video_url(2, "https://youtu.be/two").unwrap();

        c.reorder_entry(1, 2).unwrap();

        assert_eq!(c.entry(1).unwrap().video_url(), Some("https://youtu.be/two"));
        assert_eq!(c.entry(2).unwrap().video_url(), Some("https://youtu.be/one"));
    }

    #[test]
    fn test_reorder_first_entry_fixed() {
        let mut c = collection();
        c.push_entry().unwrap();
        assert_eq!(c.reorder_entry(0, 1), Err(MediaError::FirstEntryFixed));
        assert_eq!(c.reorder_entry(1, 0), Err(MediaError::FirstEntryFixed));
    }

    #[test]
    fn test_kind_switch_resets_value() {
        let mut c = collection();
        c.push_entry().unwrap();
        c.set_kind(1, MediaKind::Video).unwrap();
        c.set_video_url(1, "https://youtu.be/x").unwrap();

        c.set_kind(1, MediaKind::Image).unwrap();
        assert_eq!(c.entry(1).unwrap().kind(), MediaKind::Image);
        assert!(c.entry(1).unwrap().image().unwrap().output().is_none());

        // And back: the URL did not survive the round trip
        c.set_kind(1, MediaKind::Video).unwrap();
        assert_eq!(c.entry(1).unwrap().video_url(), Some(""));
    }

    #[test]
    fn test_kind_switch_same_kind_keeps_state() {
        let mut c = collection();
        c.set_kind(0, MediaKind::Image).unwrap();
        let bytes = png_bytes(1600, 1200);
        crop_into(&mut c, 0, &bytes);
        c.set_kind(0, MediaKind::Image).unwrap();
        assert!(c.entry(0).unwrap().image().unwrap().output().is_some());
    }

    #[test]
    fn test_crop_on_one_entry_leaves_others_alone() {
        let mut c = collection();
        c.push_entry().unwrap();
        c.push_entry().unwrap();
        let bytes = png_bytes(1600, 1200);
        crop_into(&mut c, 0, &bytes);
        crop_into(&mut c, 2, &bytes);
        let first = c.entry(0).unwrap().image().unwrap().output().cloned();
        let third = c.entry(2).unwrap().image().unwrap().output().cloned();

        crop_into(&mut c, 1, &bytes);

        assert_eq!(c.entry(0).unwrap().image().unwrap().output().cloned(), first);
        assert_eq!(c.entry(2).unwrap().image().unwrap().output().cloned(), third);
    }

    #[test]
    fn test_validate_all_aggregates_by_position() {
        let mut c = collection();
        c.push_entry().unwrap();
        c.set_kind(1, MediaKind::Video).unwrap();
        c.push_entry().unwrap();
        c.set_kind(2, MediaKind::Video).unwrap();
        c.set_video_url(2, "not a url").unwrap();

        let messages = c.validate_all();
        assert_eq!(
            messages,
            vec![
                "Image 1 is required*".to_string(),
                "Youtube 2 is required*".to_string(),
                "Youtube 3 must be a valid URL".to_string(),
            ]
        );
    }

    #[test]
    fn test_validate_all_clean_collection() {
        let mut c = collection();
        let bytes = png_bytes(1600, 1200);
        crop_into(&mut c, 0, &bytes);
        assert!(c.validate_all().is_empty());
    }

    #[test]
    fn test_multipart_keys_are_one_based() {
        let mut c = collection();
        c.push_entry().unwrap();
        c.set_kind(1, MediaKind::Video).unwrap();
        c.set_video_url(1, "https://youtu.be/x").unwrap();
        let bytes = png_bytes(1600, 1200);
        crop_into(&mut c, 0, &bytes);

        let parts = c.multipart_parts();
        assert_eq!(parts.len(), 2);
        assert!(matches!(&parts[0], MultipartPart::File { key, .. } if key == "media[1]"));
        assert!(
            matches!(&parts[1], MultipartPart::Url { key, url } if key == "media_url[2]" && *url == "https://youtu.be/x")
        );
    }

    #[test]
    fn test_multipart_skips_empty_entries() {
        let mut c = collection();
        c.push_entry().unwrap();
        assert!(c.multipart_parts().is_empty());
    }

    #[test]
    fn test_video_url_validation() {
        assert!(is_valid_video_url("https://www.youtube.com/watch?v=abc"));
        assert!(is_valid_video_url("http://youtu.be/abc"));
        assert!(!is_valid_video_url("youtube.com/watch"));
        assert!(!is_valid_video_url("ftp://youtube.com/x"));
        assert!(!is_valid_video_url("https://"));
        assert!(!is_valid_video_url("https://you tube.com/x"));
        assert!(!is_valid_video_url(""));
    }

    #[test]
    fn test_set_video_url_on_image_entry() {
        let mut c = collection();
        assert_eq!(
            c.set_video_url(0, "https://youtu.be/x"),
            Err(MediaError::NoSuchEntry(0))
        );
    }
}
