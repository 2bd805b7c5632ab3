// SPDX-License-Identifier: MPL-2.0
//! Image decoding and PNG encoding.

use crate::error::{Error, Result};
use image_rs::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Decodes encoded bytes (PNG, JPEG, GIF, WebP) into RGBA pixels.
///
/// Animated formats yield their first frame.
///
/// # Errors
///
/// Returns [`Error::Image`] if the bytes are not a supported image.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image_rs::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

/// Reads and decodes an image file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or [`Error::Image`] if
/// it cannot be decoded.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let bytes = fs::read(path.as_ref()).map_err(|e| Error::Io(e.to_string()))?;
    decode_rgba(&bytes)
}

/// Encodes pixels as PNG.
///
/// # Errors
///
/// Returns [`Error::Image`] if encoding fails.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::Rgba;
    use tempfile::tempdir;

    #[test]
    fn png_bytes_decode_back_to_same_pixels() {
        let image = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 128]));
        let png = encode_png(&image).expect("encode");
        assert_eq!(&png[..4], b"\x89PNG");

        let decoded = decode_rgba(&png).expect("decode");
        assert_eq!(decoded.dimensions(), (4, 2));
        assert_eq!(decoded.get_pixel(3, 1), &Rgba([255, 0, 0, 128]));
    }

    #[test]
    fn load_png_file_returns_expected_dimensions() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image_path = temp_dir.path().join("sample.png");
        RgbaImage::from_pixel(6, 3, Rgba([0, 0, 255, 255]))
            .save(&image_path)
            .expect("failed to write temporary png");

        let image = load_rgba(&image_path).expect("png should load successfully");
        assert_eq!(image.dimensions(), (6, 3));
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        let err = decode_rgba(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let err = load_rgba(temp_dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
