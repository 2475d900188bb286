//! Shape masks.
//!
//! Catalog outlines are authored as pictures: fixed pixel sizes, brand
//! colours, decorative strokes. A mask needs the opposite: markup that scales
//! to whatever box it is placed in and paints every covered pixel with the same
//! opaque colour, so only its silhouette matters. `sanitize_outline` performs
//! that normalisation and `build_mask` wraps the result as a `MaskPrimitive`.
//!
//! Outlines drawn with `fill="none"` stay unfilled: a ring must cut a ring, not
//! a disc.

use std::sync::LazyLock;

use image::{GrayImage, Luma};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::{Captures, Regex};

use crate::catalog::ShapeCatalog;
use crate::error::{PosterError, Result};

/// Colour every filled region and stroke is forced to.
pub const MASK_COLOUR: &str = "#FFFFFF";

/// Identifier reported by the fallback primitive.
pub const FALLBACK_MASK_ID: &str = "rounded-rect";

/// Centred rounded rectangle used when a shape id is unknown.
const FALLBACK_MARKUP: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><rect x="8" y="8" width="84" height="84" rx="12" ry="12" fill="#FFFFFF"/></svg>"##;

static ROOT_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<svg\b[^>]*>").expect("valid regex"));
static DIMENSION_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s(?:width|height)\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("valid regex")
});
static STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s)style\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});
static OPACITY_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s(?:fill-opacity|stroke-opacity|opacity)\s*=\s*(?:"[^"]*"|'[^']*')"#)
        .expect("valid regex")
});
static PAINT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s)(fill|stroke)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Characters `encodeURIComponent` leaves alone, minus `'()` which break
/// unquoted CSS `url()` values.
const DATA_URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*');

/// Normalise raw outline markup into stencil markup.
pub fn sanitize_outline(outline: &str) -> String {
    let sized = match ROOT_TAG.find(outline) {
        Some(root) => {
            let tag = DIMENSION_ATTR.replace_all(root.as_str(), "");
            format!("{}{}{}", &outline[..root.start()], tag, &outline[root.end()..])
        }
        None => outline.to_string(),
    };

    let styled = STYLE_ATTR.replace_all(&sized, |caps: &Captures| {
        let (quote, body) = match caps.get(2) {
            Some(body) => ('"', body.as_str()),
            None => ('\'', caps.get(3).map_or("", |m| m.as_str())),
        };
        format!("{}style={quote}{}{quote}", &caps[1], sanitize_style(body))
    });

    let opaque = OPACITY_ATTR.replace_all(&styled, "");

    let painted = PAINT_ATTR.replace_all(&opaque, |caps: &Captures| {
        let value = caps.get(3).or_else(|| caps.get(4)).map_or("", |m| m.as_str());
        if value.trim() == "none" {
            format!(r#"{}{}="none""#, &caps[1], &caps[2])
        } else {
            format!(r#"{}{}="{}""#, &caps[1], &caps[2], MASK_COLOUR)
        }
    });

    WHITESPACE.replace_all(&painted, " ").trim().to_string()
}

/// Apply the same rules to inline `style` declarations.
fn sanitize_style(body: &str) -> String {
    body.split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim();
            let value = value.trim();
            match prop.to_ascii_lowercase().as_str() {
                "fill-opacity" | "stroke-opacity" | "opacity" => None,
                "fill" | "stroke" if value != "none" => Some(format!("{prop}:{MASK_COLOUR}")),
                _ => Some(format!("{prop}:{value}")),
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// A stencil ready to be applied to the map layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskPrimitive {
    /// The catalog id this mask was built from, or `FALLBACK_MASK_ID`.
    pub shape_id: String,
    /// Sanitized, self-contained SVG markup.
    pub markup: String,
}

impl MaskPrimitive {
    /// The rounded-rectangle stencil used for unknown shapes.
    pub fn fallback() -> Self {
        Self {
            shape_id: FALLBACK_MASK_ID.to_string(),
            markup: FALLBACK_MARKUP.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.shape_id == FALLBACK_MASK_ID
    }

    /// `data:` URI embedding the markup, safe inside CSS `url("…")`.
    pub fn data_uri(&self) -> String {
        format!(
            "data:image/svg+xml,{}",
            utf8_percent_encode(&self.markup, DATA_URI_SET)
        )
    }

    /// CSS declarations applying this mask: contain-fit, centred, no repeat.
    pub fn css_declarations(&self) -> String {
        let image = format!("url(\"{}\")", self.data_uri());
        format!(
            "-webkit-mask-image:{image};mask-image:{image};\
             -webkit-mask-size:contain;mask-size:contain;\
             -webkit-mask-position:center;mask-position:center;\
             -webkit-mask-repeat:no-repeat;mask-repeat:no-repeat"
        )
    }

    /// Rasterize into an alpha stencil of `width`×`height`, fitted with
    /// contain semantics and centred.
    pub fn rasterize(&self, width: u32, height: u32) -> Result<GrayImage> {
        let tree = usvg::Tree::from_str(&self.markup, &usvg::Options::default())
            .map_err(|e| PosterError::render(format!("mask {} does not parse: {}", self.shape_id, e)))?;

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| PosterError::render(format!("cannot allocate {width}x{height} stencil")))?;

        let size = tree.size();
        let scale = (width as f32 / size.width()).min(height as f32 / size.height());
        let dx = (width as f32 - size.width() * scale) / 2.0;
        let dy = (height as f32 - size.height() * scale) / 2.0;
        let transform = tiny_skia::Transform::from_scale(scale, scale).post_translate(dx, dy);

        resvg::render(&tree, transform, &mut pixmap.as_mut());

        Ok(GrayImage::from_fn(width, height, |x, y| {
            Luma([pixmap.pixel(x, y).map_or(0, |p| p.alpha())])
        }))
    }
}

/// Build the mask for a catalog shape, falling back to the rounded rectangle.
pub fn build_mask(catalog: &ShapeCatalog, shape_id: &str) -> MaskPrimitive {
    match catalog.get(shape_id) {
        Some(entry) => MaskPrimitive {
            shape_id: entry.id.to_string(),
            markup: sanitize_outline(entry.outline),
        },
        None => MaskPrimitive::fallback(),
    }
}
