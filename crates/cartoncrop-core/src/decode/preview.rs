//! Preview `data:` URLs for the cropper surface.

use base64::{engine::general_purpose, Engine as _};

/// Build a `data:` URL from raw file bytes for inline preview display.
///
/// The cropper and the post-save thumbnail both render from a `data:` URL
/// rather than an object URL, so there is nothing to revoke when a field
/// is cleared: dropping the string releases the preview.
pub fn preview_data_url(bytes: &[u8], mime: &str) -> String {
    let payload = general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_shape() {
        let url = preview_data_url(b"hello", "image/png");
        assert_eq!(url, "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_data_url_empty_payload() {
        let url = preview_data_url(&[], "image/jpeg");
        assert_eq!(url, "data:image/jpeg;base64,");
    }

    #[test]
    fn test_data_url_round_trip() {
        let bytes: Vec<u8> = (0..=255).collect();
        let url = preview_data_url(&bytes, "image/webp");
        let payload = url.strip_prefix("data:image/webp;base64,").unwrap();
        let decoded = general_purpose::STANDARD.decode(payload).unwrap();
        assert_eq!(decoded, bytes);
    }
}
