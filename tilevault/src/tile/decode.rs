//! Raster decoding for fetched tile bytes.
//!
//! Decoding runs on the blocking thread pool so large tiles never stall
//! the async runtime.

use bytes::Bytes;
use image::RgbaImage;
use thiserror::Error;

/// Errors produced while turning raw bytes into pixels.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes were not a recognizable raster image.
    #[error("malformed image data: {0}")]
    Malformed(#[from] image::ImageError),

    /// The blocking decode task was cancelled or panicked.
    #[error("decode task interrupted: {0}")]
    Interrupted(String),
}

/// Decodes raster bytes into an RGBA image on the blocking pool.
///
/// Accepts any format the `image` crate recognizes from magic bytes
/// (PNG, JPEG, GIF, ...). The result is always converted to RGBA so
/// callers never deal with mixed pixel layouts.
pub async fn decode_tile(bytes: Bytes) -> Result<RgbaImage, DecodeError> {
    tokio::task::spawn_blocking(move || decode_bytes(&bytes))
        .await
        .map_err(|e| DecodeError::Interrupted(e.to_string()))?
}

/// Synchronous decode (runs in spawn_blocking).
fn decode_bytes(bytes: &[u8]) -> Result<RgbaImage, DecodeError> {
    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn encode_png(width: u32, height: u32, pixel: Rgba<u8>) -> Bytes {
        let img = RgbaImage::from_fn(width, height, |_, _| pixel);
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        img.write_to(&mut cursor, image::ImageFormat::Png).unwrap();
        Bytes::from(buffer)
    }

    #[tokio::test]
    async fn decodes_png_to_rgba() {
        let bytes = encode_png(8, 4, Rgba([10, 20, 30, 255]));

        let img = decode_tile(bytes).await.unwrap();

        assert_eq!(img.width(), 8);
        assert_eq!(img.height(), 4);
        assert_eq!(*img.get_pixel(0, 0), Rgba([10, 20, 30, 255]));
    }

    #[tokio::test]
    async fn rejects_garbage_bytes() {
        let bytes = Bytes::from_static(b"this is not an image");

        let err = decode_tile(bytes).await.unwrap_err();

        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[tokio::test]
    async fn rejects_truncated_png() {
        let full = encode_png(16, 16, Rgba([1, 2, 3, 255]));
        let truncated = full.slice(0..full.len() / 2);

        let err = decode_tile(truncated).await.unwrap_err();

        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[tokio::test]
    async fn decodes_jpeg_without_alpha() {
        let img = RgbaImage::from_fn(8, 8, |_, _| Rgba([200, 100, 50, 255]));
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        image::DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .write_to(&mut cursor, image::ImageFormat::Jpeg)
            .unwrap();

        let decoded = decode_tile(Bytes::from(buffer)).await.unwrap();

        assert_eq!(decoded.width(), 8);
        // JPEG is lossy; alpha must still come back opaque.
        assert_eq!(decoded.get_pixel(0, 0)[3], 255);
    }
}
