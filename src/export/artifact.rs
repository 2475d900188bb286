//! Export requests and their encoded results.

use std::path::Path;

use serde::Serialize;

use crate::error::{PosterError, Result};
use crate::render::{data_url, write_image};
use crate::types::Configuration;

/// Pixels per centimetre for full-size exports.
pub const DEFAULT_PX_PER_CM: u32 = 50;
/// Width of cart thumbnails.
pub const THUMBNAIL_WIDTH: u32 = 300;
pub const THUMBNAIL_QUALITY: u8 = 80;

/// Encoded image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum ImageFormat {
    Png,
    Jpeg { quality: u8 },
}

impl ImageFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg { .. } => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg { .. } => "jpg",
        }
    }
}

/// What to produce: pixel size and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl ExportOptions {
    /// Print-resolution PNG sized from the poster's centimetre dimensions.
    pub fn full(config: &Configuration, px_per_cm: u32) -> Result<Self> {
        let (w, h) = config.dimensions_cm();
        let px_per_cm = px_per_cm.max(1);
        let scale = |cm: u32| {
            cm.checked_mul(px_per_cm).ok_or_else(|| PosterError::Export {
                message: format!("{}×{} cm at {} px/cm is too large to raster", w, h, px_per_cm),
            })
        };
        Ok(Self {
            width: scale(w)?,
            height: scale(h)?,
            format: ImageFormat::Png,
        })
    }

    /// JPEG preview `width` pixels wide, height from the aspect ratio.
    pub fn thumbnail(config: &Configuration, width: u32) -> Self {
        let width = width.max(1);
        let height = ((f64::from(width) * config.aspect_ratio()).round() as u32).max(1);
        Self {
            width,
            height,
            format: ImageFormat::Jpeg {
                quality: THUMBNAIL_QUALITY,
            },
        }
    }
}

/// A self-contained encoded export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    pub fn to_data_url(&self) -> String {
        data_url(self.mime(), &self.bytes)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        write_image(&self.bytes, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Orientation, PosterSize};

    #[test]
    fn test_full_size_follows_orientation() {
        let mut config = Configuration::default();
        config.size = PosterSize::new(21, 30);
        assert_eq!(
            ExportOptions::full(&config, 50).unwrap(),
            ExportOptions {
                width: 1050,
                height: 1500,
                format: ImageFormat::Png
            }
        );

        config.orientation = Orientation::Landscape;
        let opts = ExportOptions::full(&config, 50).unwrap();
        assert_eq!((opts.width, opts.height), (1500, 1050));
    }

    #[test]
    fn test_full_size_overflow_is_an_error() {
        let mut config = Configuration::default();
        config.size = PosterSize::new(100_000_000, 1);
        let err = ExportOptions::full(&config, 50).unwrap_err();
        assert!(matches!(err, PosterError::Export { .. }));

        config.size = PosterSize::new(30, 40);
        assert!(ExportOptions::full(&config, u32::MAX).is_err());
    }

    #[test]
    fn test_thumbnail_height_from_aspect() {
        let config = Configuration::default();
        let opts = ExportOptions::thumbnail(&config, THUMBNAIL_WIDTH);
        assert_eq!((opts.width, opts.height), (300, 400));
        assert_eq!(opts.format, ImageFormat::Jpeg { quality: 80 });
    }

    #[test]
    fn test_data_url_uses_mime() {
        let artifact = ExportArtifact {
            format: ImageFormat::Jpeg { quality: 80 },
            width: 1,
            height: 1,
            bytes: vec![0xFF, 0xD8],
        };
        assert!(artifact.to_data_url().starts_with("data:image/jpeg;base64,"));
    }
}
