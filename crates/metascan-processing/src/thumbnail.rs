//! Inline preview image for the report and the web UI.

use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};

/// Decode the file at `path`, shrink it to fit a `max_dimension` square keeping its
/// aspect ratio, and return it as base64 JPEG.
///
/// Returns `None` for anything that is not a decodable image. Smaller images are
/// never enlarged.
pub fn thumbnail_base64(path: &Path, max_dimension: u32) -> Option<String> {
    match encode_thumbnail(path, max_dimension) {
        Ok(bytes) => Some(STANDARD.encode(bytes)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "No thumbnail for upload");
            None
        }
    }
}

fn encode_thumbnail(path: &Path, max_dimension: u32) -> Result<Vec<u8>, image::ImageError> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;

    let (width, height) = img.dimensions();
    let img = if width > max_dimension || height > max_dimension {
        img.thumbnail(max_dimension, max_dimension)
    } else {
        img
    };

    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buffer = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn decode(encoded: &str) -> DynamicImage {
        let bytes = STANDARD.decode(encoded).unwrap();
        image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap()
    }

    #[test]
    fn test_large_image_is_shrunk_keeping_aspect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::from_pixel(800, 200, Rgba([10, 200, 30, 128]))
            .save(&path)
            .unwrap();

        let thumb = decode(&thumbnail_base64(&path, 400).unwrap());
        assert_eq!(thumb.dimensions(), (400, 100));
    }

    #[test]
    fn test_small_image_is_not_enlarged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        RgbaImage::from_pixel(50, 30, Rgba([0, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let thumb = decode(&thumbnail_base64(&path, 400).unwrap());
        assert_eq!(thumb.dimensions(), (50, 30));
    }

    #[test]
    fn test_non_image_has_no_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain text").unwrap();

        assert!(thumbnail_base64(&path, 400).is_none());
        assert!(thumbnail_base64(&dir.path().join("missing.jpg"), 400).is_none());
    }
}
