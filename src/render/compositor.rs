//! Poster compositor.
//!
//! Turns a configuration into a layered surface: backdrop, texture, frame,
//! masked map, text block and (preview only) zoom controls. Composition is a
//! pure function of the configuration and the loaded assets, so identical input
//! always serializes to identical SVG.

use tracing::debug;

use crate::catalog::ShapeCatalog;
use crate::error::Result;
use crate::export::Exportable;
use crate::mask::build_mask;
use crate::style::{self, Template};
use crate::types::{Background, Colour, Configuration, Frame};

use super::assets::{Asset, AssetStore};
use super::map::{MapLayer, MapSnapshot};
use super::surface::{num, Fit, ImageNode, MapNode, Node, NodeContent, NodeKind, Rect, Surface};
use super::text::{self, PlacedText};

/// Length of the poster's shorter edge in surface units.
pub const SHORT_EDGE: f32 = 600.0;

/// Margin between the poster edge and the map rectangle.
pub const MAP_INSET: f32 = 48.0;

const FRAME_BORDER: f32 = 16.0;
const HANGER_BAR: f32 = 14.0;
const HANGER_COLOUR: Colour = Colour::rgb(139, 94, 60);
const TEXTURE_OPACITY: f32 = 0.6;
/// Space kept free between the map and the top of the text block.
const TEXT_CLEARANCE: f32 = 24.0;

/// Surface dimensions for a configuration, preserving its aspect ratio.
pub fn surface_size(config: &Configuration) -> (f32, f32) {
    let (w, h) = config.dimensions_cm();
    let (w, h) = (w as f32, h as f32);
    if w <= h {
        (SHORT_EDGE, SHORT_EDGE * h / w)
    } else {
        (SHORT_EDGE * w / h, SHORT_EDGE)
    }
}

/// Composes configurations against a shape catalog and loaded assets.
#[derive(Debug, Clone, Default)]
pub struct PosterCompositor {
    catalog: ShapeCatalog,
    assets: AssetStore,
}

impl PosterCompositor {
    pub fn new(catalog: ShapeCatalog, assets: AssetStore) -> Self {
        Self { catalog, assets }
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetStore {
        &mut self.assets
    }

    /// Build the layered surface for `config`.
    pub fn compose(&self, config: &Configuration) -> PosterView {
        let template = style::resolve(config.style.id());
        let mask = build_mask(&self.catalog, &config.shape);
        let (width, height) = surface_size(config);
        let full = Rect::new(0.0, 0.0, width, height);

        let lines = text::layout(config, &template, width, height);
        let map_rect = map_rect(width, height, &lines);

        debug!(
            shape = %mask.shape_id,
            style = config.style.id(),
            width,
            height,
            "composing poster"
        );

        let mut surface = Surface::new(width, height);

        surface.push(Node {
            id: "style",
            kind: NodeKind::Style,
            ui_only: false,
            content: NodeContent::Markup(stylesheet(&template)),
        });

        surface.push(Node {
            id: "backdrop",
            kind: NodeKind::Background,
            ui_only: false,
            content: NodeContent::Markup(format!(
                r#"<rect id="backdrop" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
                num(width),
                num(height),
                Colour::WHITE.svg_hex()
            )),
        });

        if let Some(texture) = self.texture(config.background, full) {
            surface.push(Node {
                id: "texture",
                kind: NodeKind::Background,
                ui_only: false,
                content: NodeContent::Image(texture),
            });
        }

        let map = MapLayer {
            source: self.assets.map().cloned(),
            theme: config.theme,
            rect: map_rect,
            mask: mask.clone(),
        };
        surface.push(Node {
            id: "map",
            kind: NodeKind::Map,
            ui_only: false,
            content: NodeContent::Map(MapNode {
                rect: map_rect,
                href: map.source.as_ref().and_then(Asset::decoded).map(|d| d.data_url()),
                theme: config.theme,
                mask,
            }),
        });

        if let Some(markup) = text::markup(&template, &lines) {
            surface.push(Node {
                id: "text-block",
                kind: NodeKind::Text,
                ui_only: false,
                content: NodeContent::Markup(markup),
            });
        }

        if let Some(markup) = frame_markup(config.frame, width, height) {
            surface.push(Node {
                id: "frame",
                kind: NodeKind::Frame,
                ui_only: false,
                content: NodeContent::Markup(markup),
            });
        }

        surface.push(Node {
            id: "zoom-controls",
            kind: NodeKind::Control,
            ui_only: true,
            content: NodeContent::Markup(zoom_controls(map_rect)),
        });

        PosterView {
            template,
            surface,
            map,
            text: lines,
        }
    }

    fn texture(&self, background: Background, rect: Rect) -> Option<ImageNode> {
        if !background.is_textured() {
            return None;
        }
        let Some(asset) = self.assets.background(background) else {
            debug!(background = background.id(), "no texture loaded, using plain backdrop");
            return None;
        };
        Some(ImageNode {
            rect,
            href: asset.decoded().map(|d| d.data_url()),
            opacity: TEXTURE_OPACITY,
            fit: Fit::Cover,
        })
    }
}

/// The map rectangle sits inside the margin and stops above the text block.
fn map_rect(width: f32, height: f32, lines: &[PlacedText]) -> Rect {
    let mut bottom = height - MAP_INSET;
    if let Some(first) = lines.first() {
        bottom = bottom.min(first.top - TEXT_CLEARANCE);
    }
    Rect::new(
        MAP_INSET,
        MAP_INSET,
        (width - 2.0 * MAP_INSET).max(0.0),
        (bottom - MAP_INSET).max(0.0),
    )
}

fn stylesheet(template: &Template) -> String {
    format!(
        "<style>#text-block{{font-family:{};font-kerning:normal}}#zoom-controls{{cursor:pointer}}</style>",
        template.font_family
    )
}

fn frame_markup(frame: Frame, width: f32, height: f32) -> Option<String> {
    match frame {
        Frame::None => None,
        Frame::Frame => {
            let half = FRAME_BORDER / 2.0;
            Some(format!(
                r#"<rect id="frame" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                num(half),
                num(half),
                num(width - FRAME_BORDER),
                num(height - FRAME_BORDER),
                Colour::INK.svg_hex(),
                num(FRAME_BORDER)
            ))
        }
        Frame::Hanger => {
            let fill = HANGER_COLOUR.svg_hex();
            Some(format!(
                r#"<g id="frame"><rect x="0" y="0" width="{w}" height="{bar}" fill="{fill}"/><rect x="0" y="{y}" width="{w}" height="{bar}" fill="{fill}"/></g>"#,
                w = num(width),
                bar = num(HANGER_BAR),
                y = num(height - HANGER_BAR),
                fill = fill
            ))
        }
    }
}

fn zoom_controls(map: Rect) -> String {
    let size = 28.0;
    let x = map.x + map.w - size - 8.0;
    let y = map.y + 8.0;
    let mut out = String::from(r#"<g id="zoom-controls" font-family="sans-serif" font-size="18" text-anchor="middle">"#);
    for (i, (label, action)) in [("+", "zoom-in"), ("\u{2212}", "zoom-out")].into_iter().enumerate() {
        let top = y + i as f32 * (size + 4.0);
        out.push_str(&format!(
            r##"<g data-action="{action}"><rect x="{}" y="{}" width="{s}" height="{s}" rx="4" fill="#FFFFFF" stroke="#D1D5DB"/><text x="{}" y="{}" fill="#111111">{label}</text></g>"##,
            num(x),
            num(top),
            num(x + size / 2.0),
            num(top + size / 2.0 + 6.0),
            s = num(size),
        ));
    }
    out.push_str("</g>");
    out
}

/// A composed poster: the surface plus what the export pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterView {
    pub template: Template,
    pub surface: Surface,
    pub map: MapLayer,
    pub text: Vec<PlacedText>,
}

impl Exportable for PosterView {
    fn surface(&self) -> Option<&Surface> {
        Some(&self.surface)
    }

    fn snapshot_map_layer(&self) -> Result<MapSnapshot> {
        self.map.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Section, StyleId};
    use crate::types::{Orientation, PosterSize};
    use image::{Rgba, RgbaImage};

    fn compositor() -> PosterCompositor {
        let map = Asset::ready(RgbaImage::from_pixel(16, 16, Rgba([80, 120, 160, 255]))).unwrap();
        PosterCompositor::new(ShapeCatalog::builtin(), AssetStore::new().with_map(map))
    }

    fn ids(view: &PosterView) -> Vec<&'static str> {
        view.surface.nodes().iter().map(|n| n.id).collect()
    }

    #[test]
    fn test_surface_size_follows_orientation() {
        let mut config = Configuration::default();
        config.size = PosterSize::new(30, 40);
        assert_eq!(surface_size(&config), (600.0, 800.0));
        config.orientation = Orientation::Landscape;
        assert_eq!(surface_size(&config), (800.0, 600.0));
    }

    #[test]
    fn test_layer_order() {
        let view = compositor().compose(&Configuration::default());
        assert_eq!(ids(&view), vec!["style", "backdrop", "map", "text-block", "zoom-controls"]);
    }

    #[test]
    fn test_frame_layer_present_only_when_selected() {
        let mut config = Configuration::default();
        config.frame = Frame::Frame;
        let view = compositor().compose(&config);
        assert!(view.surface.node("frame").is_some());

        config.frame = Frame::Hanger;
        let view = compositor().compose(&config);
        let svg = view.surface.preview_svg();
        assert!(svg.contains(r#"<g id="frame">"#));
    }

    #[test]
    fn test_compose_is_idempotent() {
        let compositor = compositor();
        let mut config = Configuration::default();
        config.style = StyleId::Bauhaus;
        config.frame = Frame::Frame;
        let a = compositor.compose(&config).surface.preview_svg();
        let b = compositor.compose(&config).surface.preview_svg();
        assert_eq!(a, b);
    }

    #[test]
    fn test_title_toggle_removes_only_title() {
        let compositor = compositor();
        let mut config = Configuration::default();
        let before = compositor.compose(&config);
        config.visibility.show_title = false;
        let after = compositor.compose(&config);

        let sections = |v: &PosterView| v.text.iter().map(|t| t.section).collect::<Vec<_>>();
        assert_eq!(sections(&before)[1..], sections(&after)[..]);
        assert!(!sections(&after).contains(&Section::Title));
    }

    #[test]
    fn test_unknown_shape_uses_fallback_mask() {
        let mut config = Configuration::default();
        config.shape = "triangle".into();
        let view = compositor().compose(&config);
        assert!(view.map.mask.is_fallback());
    }

    #[test]
    fn test_map_sits_above_text() {
        let view = compositor().compose(&Configuration::default());
        let first = view.text.first().unwrap();
        assert!(view.map.rect.y + view.map.rect.h <= first.top);
    }

    #[test]
    fn test_loading_texture_is_hidden() {
        let compositor = PosterCompositor::new(
            ShapeCatalog::builtin(),
            AssetStore::new().with_background(Background::Wood, Asset::Loading),
        );
        let mut config = Configuration::default();
        config.background = Background::Wood;
        let svg = compositor.compose(&config).surface.preview_svg();
        assert!(svg.contains(r#"<g id="texture" opacity="0"/>"#));
    }

    #[test]
    fn test_map_tile_arriving_after_compose() {
        let mut compositor = PosterCompositor::new(
            ShapeCatalog::builtin(),
            AssetStore::new().with_map(Asset::Loading),
        );
        let config = Configuration::default();
        assert!(compositor.compose(&config).snapshot_map_layer().is_err());

        let tile = Asset::ready(RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255]))).unwrap();
        compositor.assets_mut().set_map(tile);
        assert!(compositor.compose(&config).snapshot_map_layer().is_ok());
    }

    #[test]
    fn test_exportable_snapshot() {
        let view = compositor().compose(&Configuration::default());
        assert!(view.surface().is_some());
        assert_eq!(view.snapshot_map_layer().unwrap().width(), 16);
    }
}
