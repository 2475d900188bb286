//! The map layer and its off-screen snapshot.
//!
//! The live preview applies the theme and mask in CSS. Exports cannot rely on
//! that, so the layer is snapshotted: the source image at its natural size
//! with the theme filter baked into the pixels. The export pipeline then
//! crops it to the map rectangle and multiplies it by the mask stencil.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::{PosterError, Result};
use crate::mask::MaskPrimitive;
use crate::types::Theme;

use super::assets::Asset;
use super::png::{data_url, encode_png};
use super::surface::Rect;
use super::theme;

/// Everything needed to reproduce the map layer off-screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    pub source: Option<Asset>,
    pub theme: Theme,
    pub rect: Rect,
    pub mask: MaskPrimitive,
}

impl MapLayer {
    /// Snapshot the themed source image at its natural resolution.
    pub fn snapshot(&self) -> Result<MapSnapshot> {
        let decoded = match &self.source {
            Some(asset) => asset
                .decoded()
                .ok_or_else(|| PosterError::render("map image is still loading"))?,
            None => return Err(PosterError::render("no map image is available")),
        };

        let mut pixels = decoded.pixels.clone();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(PosterError::render("map image is empty"));
        }
        theme::apply(self.theme, &mut pixels);

        let png = encode_png(&pixels)?;
        Ok(MapSnapshot { pixels, png })
    }
}

/// A themed, unmasked map raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSnapshot {
    pub pixels: RgbaImage,
    pub png: Vec<u8>,
}

impl MapSnapshot {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn data_url(&self) -> String {
        data_url("image/png", &self.png)
    }

    /// Cover-fit into `width`×`height` and cut through `mask`.
    pub fn masked(&self, mask: &MaskPrimitive, width: u32, height: u32) -> Result<RgbaImage> {
        if width == 0 || height == 0 {
            return Err(PosterError::render("map rectangle has no area"));
        }

        let mut out = cover(&self.pixels, width, height);
        let stencil = mask.rasterize(width, height)?;

        for (pixel, cover) in out.pixels_mut().zip(stencil.pixels()) {
            let alpha = u16::from(pixel.0[3]) * u16::from(cover.0[0]);
            pixel.0[3] = ((alpha + 127) / 255) as u8;
        }

        Ok(out)
    }
}

/// Scale to cover `width`×`height`, then crop the centre.
fn cover(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (sw, sh) = img.dimensions();
    let scale = (width as f32 / sw as f32).max(height as f32 / sh as f32);
    let rw = ((sw as f32 * scale).ceil() as u32).max(width);
    let rh = ((sh as f32 * scale).ceil() as u32).max(height);

    let resized = imageops::resize(img, rw, rh, FilterType::Triangle);
    let x = (rw - width) / 2;
    let y = (rh - height) / 2;
    imageops::crop_imm(&resized, x, y, width, height).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn layer(source: Option<Asset>, theme: Theme) -> MapLayer {
        MapLayer {
            source,
            theme,
            rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            mask: MaskPrimitive::fallback(),
        }
    }

    #[test]
    fn test_snapshot_keeps_natural_size_and_applies_theme() {
        let asset = Asset::ready(RgbaImage::from_pixel(8, 5, Rgba([255, 255, 255, 255]))).unwrap();
        let snapshot = layer(Some(asset), Theme::Black).snapshot().unwrap();
        assert_eq!((snapshot.width(), snapshot.height()), (8, 5));
        assert_eq!(snapshot.pixels.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert!(!snapshot.png.is_empty());
    }

    #[test]
    fn test_snapshot_fails_without_ready_source() {
        assert!(layer(None, Theme::White).snapshot().is_err());
        assert!(layer(Some(Asset::Loading), Theme::White).snapshot().is_err());
    }

    #[test]
    fn test_masked_cuts_corners() {
        let asset = Asset::ready(RgbaImage::from_pixel(20, 10, Rgba([10, 20, 30, 255]))).unwrap();
        let snapshot = layer(Some(asset), Theme::White).snapshot().unwrap();
        let out = snapshot.masked(&MaskPrimitive::fallback(), 50, 50).unwrap();

        assert_eq!(out.dimensions(), (50, 50));
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(25, 25).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_cover_crops_centre() {
        let img = RgbaImage::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        let out = cover(&img, 2, 2);
        assert_eq!(out.dimensions(), (2, 2));
    }
}
