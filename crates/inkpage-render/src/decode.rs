//! Decoding of the opaque encoded-image string stored with each page.

use base64::{Engine, engine::general_purpose::STANDARD};
use image::ImageFormat;
use inkpage_core::error::DecodeError;
use inkpage_core::image::{BoxFuture, DecodedImage, ImageLoader};

/// Decodes base64 data URLs (or bare base64) holding PNG, JPEG or WebP.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl ImageDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode synchronously.
    pub fn decode(&self, encoded: &str) -> Result<DecodedImage, DecodeError> {
        let bytes = decode_payload(encoded)?;

        let format = image::guess_format(&bytes).map_err(|e| DecodeError::Format(e.to_string()))?;
        if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP) {
            return Err(DecodeError::Format(format!("{format:?}")));
        }

        let decoded = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| DecodeError::Decode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        DecodedImage::from_rgba(width, height, rgba.into_raw())
    }
}

impl ImageLoader for ImageDecoder {
    fn load(&self, encoded: &str) -> BoxFuture<'static, Result<DecodedImage, DecodeError>> {
        let decoder = *self;
        let encoded = encoded.to_string();
        Box::pin(async move { decoder.decode(&encoded) })
    }
}

/// Wrap encoded image bytes in a base64 data URL.
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn decode_payload(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let encoded = encoded.trim();
    let payload = match encoded.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest
                .split_once(',')
                .ok_or_else(|| DecodeError::Encoding("data URL without payload".to_string()))?;
            if !header.ends_with(";base64") {
                return Err(DecodeError::Encoding(format!(
                    "only base64 data URLs are supported, got {header:?}"
                )));
            }
            data
        }
        None => encoded,
    };
    if payload.is_empty() {
        return Err(DecodeError::Encoding("empty image data".to_string()));
    }
    STANDARD
        .decode(payload)
        .map_err(|e| DecodeError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        img.put_pixel(2, 1, Rgba([200, 0, 0, 128]));
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_decode_data_url() {
        let url = to_data_url(&png_bytes(), "image/png");
        let image = ImageDecoder::new().decode(&url).unwrap();

        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(&image.rgba()[..4], &[10, 20, 30, 255]);
        assert_eq!(&image.rgba()[20..24], &[200, 0, 0, 128]);
    }

    #[test]
    fn test_decode_bare_base64() {
        let bare = STANDARD.encode(png_bytes());
        assert!(ImageDecoder::new().decode(&bare).is_ok());
    }

    #[test]
    fn test_async_load() {
        let url = to_data_url(&png_bytes(), "image/png");
        let image = pollster::block_on(ImageDecoder::new().load(&url)).unwrap();
        assert_eq!(image.width(), 3);
    }

    #[test]
    fn test_bad_base64() {
        let result = ImageDecoder::new().decode("data:image/png;base64,@@@@");
        assert!(matches!(result, Err(DecodeError::Encoding(_))));
    }

    #[test]
    fn test_non_base64_data_url() {
        let result = ImageDecoder::new().decode("data:image/svg+xml,<svg/>");
        assert!(matches!(result, Err(DecodeError::Encoding(_))));
    }

    #[test]
    fn test_unknown_format() {
        let url = to_data_url(b"definitely not an image", "image/png");
        let result = ImageDecoder::new().decode(&url);
        assert!(matches!(result, Err(DecodeError::Format(_))));
    }

    #[test]
    fn test_truncated_png() {
        let bytes = png_bytes();
        let url = to_data_url(&bytes[..bytes.len() / 2], "image/png");
        let result = ImageDecoder::new().decode(&url);
        assert!(matches!(result, Err(DecodeError::Decode(_))));
    }
}
