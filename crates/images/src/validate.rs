//! Checks that downloaded bytes are an image a slide can embed.

use crate::FetchError;
use image::ImageReader;
use slidegen_core::{ImageFormat, Picture};
use std::io::Cursor;

/// Map a decoder format onto the formats slides can carry.
fn embeddable_format(format: image::ImageFormat) -> Option<ImageFormat> {
    match format {
        image::ImageFormat::Png => Some(ImageFormat::Png),
        image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
        image::ImageFormat::Gif => Some(ImageFormat::Gif),
        _ => None,
    }
}

/// Sniff the format and decode the header of `data`.
///
/// Returns the picture when it is a PNG, JPEG or GIF with non-zero dimensions.
pub fn validate_image(data: Vec<u8>) -> Result<Picture, FetchError> {
    if data.is_empty() {
        return Err(FetchError::EmptyBody);
    }

    let reader = ImageReader::new(Cursor::new(data.as_slice()))
        .with_guessed_format()
        .map_err(|e| FetchError::Decode(e.to_string()))?;

    let format = reader
        .format()
        .and_then(embeddable_format)
        .ok_or_else(|| FetchError::Decode("unsupported or unknown image format".to_string()))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    if width == 0 || height == 0 {
        return Err(FetchError::Decode(format!("empty image {}x{}", width, height)));
    }

    log::debug!("Accepted {:?} image {}x{}", format, width, height);
    Ok(Picture { data, format })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::TINY_PNG;

    #[test]
    fn test_accepts_png() {
        let picture = validate_image(TINY_PNG.to_vec()).unwrap();
        assert_eq!(picture.format, ImageFormat::Png);
        assert_eq!(picture.data, TINY_PNG);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(validate_image(Vec::new()), Err(FetchError::EmptyBody)));
    }

    #[test]
    fn test_rejects_html() {
        let body = b"<!DOCTYPE html><html><body>Not found</body></html>".to_vec();
        assert!(matches!(validate_image(body), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_rejects_truncated_png() {
        let truncated = TINY_PNG[..12].to_vec();
        assert!(validate_image(truncated).is_err());
    }
}
