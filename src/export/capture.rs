//! Surface rasterization.

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::error::{PosterError, Result};

/// Rasterizes a serialized surface.
pub trait Capturer {
    fn capture(&self, svg: &str, width: u32, height: u32) -> Result<RgbaImage>;
}

/// Renders SVG with resvg, resolving text against the system fonts.
#[derive(Debug, Clone)]
pub struct ResvgCapturer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl ResvgCapturer {
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// A capturer with no fonts; text is skipped. Useful for tests.
    pub fn without_fonts() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }
}

impl Default for ResvgCapturer {
    fn default() -> Self {
        Self::new()
    }
}

impl Capturer for ResvgCapturer {
    fn capture(&self, svg: &str, width: u32, height: u32) -> Result<RgbaImage> {
        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::clone(&self.fontdb);

        let tree = usvg::Tree::from_str(svg, &opt)
            .map_err(|e| PosterError::render(format!("surface does not parse: {}", e)))?;

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| PosterError::render(format!("cannot allocate {width}x{height} raster")))?;

        let size = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let mut img = RgbaImage::new(width, height);
        for (pixel, px) in img.pixels_mut().zip(pixmap.pixels()) {
            let c = px.demultiply();
            *pixel = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(img)
    }
}
