use std::path::Path;

/// Sniff the image format from leading magic bytes.
pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

/// MIME type of an input image, taken from its extension and falling back
/// to the file contents, then to `image/png`.
pub fn mime_type_for_path(path: &Path, bytes: &[u8]) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => detect_image_mime(bytes).unwrap_or_else(|| {
            tracing::warn!(
                "Unrecognized image format for {} (first 4 bytes: {:02X?}), falling back to image/png",
                path.display(),
                &bytes[..bytes.len().min(4)]
            );
            "image/png"
        }),
    }
}

/// File extension (with leading dot) for a response MIME type.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => ".png",
        "image/jpeg" => ".jpg",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        _ => ".png",
    }
}

/// File extension for a user-facing format name such as `jpeg`.
pub fn extension_for_format(format: &str) -> &'static str {
    match format.to_ascii_lowercase().as_str() {
        "jpeg" | "jpg" => ".jpg",
        _ => ".png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some("image/png")
        );
    }

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(
            detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_detect_webp() {
        assert_eq!(
            detect_image_mime(&[
                0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            Some("image/webp")
        );
    }

    #[test]
    fn test_detect_empty() {
        assert_eq!(detect_image_mime(&[]), None);
    }

    #[test]
    fn test_extension_wins_over_contents() {
        let jpeg_bytes = [0xFF, 0xD8, 0xFF, 0xE0];
        assert_eq!(
            mime_type_for_path(Path::new("photo.PNG"), &jpeg_bytes),
            "image/png"
        );
        assert_eq!(
            mime_type_for_path(Path::new("scan.bmp"), &[]),
            "image/bmp"
        );
    }

    #[test]
    fn test_unknown_extension_sniffs_contents() {
        assert_eq!(
            mime_type_for_path(Path::new("upload.bin"), &[0xFF, 0xD8, 0xFF, 0xE0]),
            "image/jpeg"
        );
        assert_eq!(
            mime_type_for_path(Path::new("noext"), &[0x00, 0x01]),
            "image/png"
        );
    }

    #[test]
    fn test_extension_for_mime() {
        assert_eq!(extension_for_mime("image/png"), ".png");
        assert_eq!(extension_for_mime("image/jpeg"), ".jpg");
        assert_eq!(extension_for_mime("image/gif"), ".gif");
        assert_eq!(extension_for_mime("image/webp"), ".webp");
        assert_eq!(extension_for_mime("image/heic"), ".png");
        assert_eq!(extension_for_mime(""), ".png");
    }

    #[test]
    fn test_extension_for_format() {
        assert_eq!(extension_for_format("JPEG"), ".jpg");
        assert_eq!(extension_for_format("jpg"), ".jpg");
        assert_eq!(extension_for_format("png"), ".png");
        assert_eq!(extension_for_format("tiff"), ".png");
    }
}
