//! Raster encoding.
//!
//! Encodes RGBA buffers as PNG (lossless, for print) or JPEG (lossy, for
//! previews), and wraps encoded bytes as `data:` URLs for embedding.

use std::path::Path;

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, RgbaImage};

use crate::error::{PosterError, Result};

/// Encode as PNG. Output is deterministic for identical input.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut bytes, CompressionType::Default, FilterType::Adaptive);
    encoder
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(|e| PosterError::render(format!("Failed to encode PNG: {}", e)))?;
    Ok(bytes)
}

/// Encode as JPEG at `quality` (1-100). Transparency is flattened onto white.
pub fn encode_jpeg(img: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    let flat = flatten_on_white(img);
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    encoder
        .write_image(flat.as_raw(), flat.width(), flat.height(), ExtendedColorType::Rgb8)
        .map_err(|e| PosterError::render(format!("Failed to encode JPEG: {}", e)))?;
    Ok(bytes)
}

/// Composite over an opaque white backdrop.
pub fn flatten_on_white(img: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        let a = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * a + 255 * (255 - a) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Write encoded bytes to `path`.
pub fn write_image(bytes: &[u8], path: &Path) -> Result<()> {
    std::fs::write(path, bytes).map_err(|e| PosterError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write image: {}", e),
    })
}
