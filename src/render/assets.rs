//! Image assets referenced by the poster surface.
//!
//! The map imagery and the background textures are static files. An asset is
//! either decoded (pixels plus a ready PNG encoding) or still loading; loading
//! assets are never drawn half-finished.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;
use tracing::{debug, warn};

use crate::error::{PosterError, Result};
use crate::types::Background;

use super::png::{data_url, encode_png};

/// A decoded image and its PNG encoding.
#[derive(Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub pixels: RgbaImage,
    pub png: Vec<u8>,
}

impl DecodedImage {
    pub fn data_url(&self) -> String {
        data_url("image/png", &self.png)
    }
}

/// Load state of an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Ready(Arc<DecodedImage>),
    Loading,
}

impl Asset {
    /// Wrap decoded pixels.
    pub fn ready(pixels: RgbaImage) -> Result<Self> {
        let png = encode_png(&pixels)?;
        Ok(Asset::Ready(Arc::new(DecodedImage { pixels, png })))
    }

    /// Decode an image file.
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| PosterError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to decode image: {}", e),
        })?;
        Self::ready(img.to_rgba8())
    }

    pub fn decoded(&self) -> Option<&DecodedImage> {
        match self {
            Asset::Ready(img) => Some(img),
            Asset::Loading => None,
        }
    }
}

/// Extensions tried, in order, when looking for a background texture.
const TEXTURE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// All images a poster may reference.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    map: Option<Asset>,
    backgrounds: BTreeMap<Background, Asset>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the map image and any `<id>.jpg|jpeg|png` textures found in
    /// `backgrounds_dir`. Unreadable files are skipped with a warning; the
    /// compositor falls back to a plain backdrop or an absent map.
    pub fn load(map_path: Option<&Path>, backgrounds_dir: Option<&Path>) -> Self {
        let mut store = Self::new();

        if let Some(path) = map_path {
            match Asset::open(path) {
                Ok(asset) => store.map = Some(asset),
                Err(e) => warn!(error = %e, "map image unavailable"),
            }
        }

        if let Some(dir) = backgrounds_dir {
            for background in Background::ALL.into_iter().filter(|b| b.is_textured()) {
                let found = TEXTURE_EXTENSIONS
                    .iter()
                    .map(|ext| dir.join(format!("{}.{}", background.id(), ext)))
                    .find(|p| p.exists());

                match found.map(|p| Asset::open(&p)) {
                    Some(Ok(asset)) => {
                        store.backgrounds.insert(background, asset);
                    }
                    Some(Err(e)) => warn!(error = %e, background = background.id(), "texture unavailable"),
                    None => debug!(background = background.id(), "no texture file"),
                }
            }
        }

        store
    }

    pub fn with_map(mut self, asset: Asset) -> Self {
        self.map = Some(asset);
        self
    }

    pub fn with_background(mut self, background: Background, asset: Asset) -> Self {
        self.backgrounds.insert(background, asset);
        self
    }

    pub fn set_map(&mut self, asset: Asset) {
        self.map = Some(asset);
    }

    pub fn set_background(&mut self, background: Background, asset: Asset) {
        self.backgrounds.insert(background, asset);
    }

    pub fn map(&self) -> Option<&Asset> {
        self.map.as_ref()
    }

    pub fn background(&self, background: Background) -> Option<&Asset> {
        self.backgrounds.get(&background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_ready_asset_keeps_png() {
        let asset = Asset::ready(RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]))).unwrap();
        let decoded = asset.decoded().unwrap();
        assert_eq!(decoded.pixels.dimensions(), (3, 2));
        assert!(decoded.data_url().starts_with("data:image/png;base64,"));
        assert!(Asset::Loading.decoded().is_none());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let map = dir.path().join("static-map.png");
        RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255])).save(&map).unwrap();
        RgbaImage::from_pixel(2, 2, Rgba([200, 150, 100, 255]))
            .save(dir.path().join("wood.png"))
            .unwrap();

        let store = AssetStore::load(Some(&map), Some(dir.path()));
        assert!(store.map().and_then(Asset::decoded).is_some());
        assert!(store.background(Background::Wood).is_some());
        assert!(store.background(Background::Marble).is_none());
    }

    #[test]
    fn test_missing_map_is_skipped() {
        let store = AssetStore::load(Some(Path::new("/nonexistent/map.png")), None);
        assert!(store.map().is_none());
    }
}
