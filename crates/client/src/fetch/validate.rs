//! Image payload validation for fetched icons.

use std::io::Cursor;

use image::ImageReader;

/// Dimensions of an image payload, or `None` when the bytes are not a
/// recognisable image.
///
/// Only the header is decoded, which is enough to reject HTML error pages
/// served with a 200 status.
pub fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format().ok()?;
    reader.format()?;
    reader.into_dimensions().ok()
}

/// True when `bytes` decode as an image.
pub fn is_image(bytes: &[u8]) -> bool {
    image_dimensions(bytes).is_some()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};

    pub(crate) fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::new_rgba8(width, height)
            .write_to(&mut Cursor::new(&mut buf), format)
            .unwrap();
        buf
    }

    #[test]
    fn test_png_is_image() {
        assert_eq!(image_dimensions(&encoded(16, 8, ImageFormat::Png)), Some((16, 8)));
    }

    #[test]
    fn test_ico_is_image() {
        assert_eq!(image_dimensions(&encoded(32, 32, ImageFormat::Ico)), Some((32, 32)));
    }

    #[test]
    fn test_html_is_not_image() {
        assert!(!is_image(b"<!DOCTYPE html><html><body>Not found</body></html>"));
    }

    #[test]
    fn test_empty_is_not_image() {
        assert!(!is_image(b""));
    }

    #[test]
    fn test_truncated_png_is_not_image() {
        let png = encoded(4, 4, ImageFormat::Png);
        assert!(!is_image(&png[..12]));
    }
}
