//! The composed poster surface.
//!
//! A `Surface` is an ordered list of layer nodes in poster units. It
//! serializes to SVG in two modes: `Preview` keeps everything, including
//! UI-only controls and the live filtered/masked map reference, while
//! `Capture` drops UI-only and non-visual nodes and swaps the map for a
//! pre-rendered snapshot supplied by the export pipeline.

use std::fmt::Write;

use crate::mask::MaskPrimitive;
use crate::types::Theme;

use super::theme::css_filter;

/// Axis-aligned rectangle in surface units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Shrink by `by` on every side.
    pub fn inset(self, by: f32) -> Self {
        Self {
            x: self.x + by,
            y: self.y + by,
            w: (self.w - 2.0 * by).max(0.0),
            h: (self.h - 2.0 * by).max(0.0),
        }
    }

    fn attrs(&self) -> String {
        format!(
            r#"x="{}" y="{}" width="{}" height="{}""#,
            num(self.x),
            num(self.y),
            num(self.w),
            num(self.h)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Stylesheet; never painted.
    Style,
    Background,
    Frame,
    Map,
    Text,
    /// Interactive controls.
    Control,
}

impl NodeKind {
    pub fn is_visual(self) -> bool {
        self != NodeKind::Style
    }
}

/// How an image fills its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Cover the rectangle, cropping overflow.
    Cover,
    /// Stretch to the rectangle exactly.
    Stretch,
}

impl Fit {
    fn preserve_aspect_ratio(self) -> &'static str {
        match self {
            Fit::Cover => "xMidYMid slice",
            Fit::Stretch => "none",
        }
    }
}

/// A raster image node. `href` is `None` while the image is still loading.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageNode {
    pub rect: Rect,
    pub href: Option<String>,
    pub opacity: f32,
    pub fit: Fit,
}

/// The map layer: a themed image cut through the shape mask.
#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    pub rect: Rect,
    pub href: Option<String>,
    pub theme: Theme,
    pub mask: MaskPrimitive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    Markup(String),
    Image(ImageNode),
    Map(MapNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: &'static str,
    pub kind: NodeKind,
    /// Present only for interaction; excluded from exported images.
    pub ui_only: bool,
    pub content: NodeContent,
}

/// How a surface is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode<'a> {
    /// Everything, as shown in the editor.
    Preview,
    /// Export view. `map` is a data URL of the masked map snapshot, if any.
    Capture { map: Option<&'a str> },
}

/// An ordered stack of layer nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
    nodes: Vec<Node>,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn map_node(&self) -> Option<&MapNode> {
        self.nodes.iter().find_map(|n| match &n.content {
            NodeContent::Map(map) => Some(map),
            _ => None,
        })
    }

    /// Height divided by width.
    pub fn aspect_ratio(&self) -> f32 {
        self.height / self.width
    }

    /// SVG at the surface's own size, as shown in the editor.
    pub fn preview_svg(&self) -> String {
        self.to_svg(
            self.width.round() as u32,
            self.height.round() as u32,
            RenderMode::Preview,
        )
    }

    /// Serialize to an SVG document of `width`×`height` pixels. The surface is
    /// scaled uniformly and centred if the aspect ratios differ.
    pub fn to_svg(&self, width: u32, height: u32, mode: RenderMode<'_>) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid meet">"#,
            width,
            height,
            num(self.width),
            num(self.height)
        );

        let capturing = matches!(mode, RenderMode::Capture { .. });
        if capturing {
            let _ = write!(
                out,
                r##"<rect x="0" y="0" width="{}" height="{}" fill="#FFFFFF"/>"##,
                num(self.width),
                num(self.height)
            );
        }

        for node in &self.nodes {
            if capturing && (node.ui_only || !node.kind.is_visual()) {
                continue;
            }

            match &node.content {
                NodeContent::Markup(markup) => out.push_str(markup),
                NodeContent::Image(image) => write_image(&mut out, node.id, image),
                NodeContent::Map(map) => match mode {
                    RenderMode::Preview => write_live_map(&mut out, node.id, map),
                    RenderMode::Capture { map: Some(href) } => {
                        let _ = write!(
                            out,
                            r#"<image id="{}" {} preserveAspectRatio="none" xlink:href="{}"/>"#,
                            node.id,
                            map.rect.attrs(),
                            escape_xml(href)
                        );
                    }
                    RenderMode::Capture { map: None } => {}
                },
            }
        }

        out.push_str("</svg>");
        out
    }
}

fn write_image(out: &mut String, id: &str, image: &ImageNode) {
    match &image.href {
        Some(href) => {
            let _ = write!(
                out,
                r#"<image id="{}" {} preserveAspectRatio="{}" opacity="{}" xlink:href="{}"/>"#,
                id,
                image.rect.attrs(),
                image.fit.preserve_aspect_ratio(),
                num(image.opacity),
                escape_xml(href)
            );
        }
        None => hidden_placeholder(out, id),
    }
}

fn write_live_map(out: &mut String, id: &str, map: &MapNode) {
    match &map.href {
        Some(href) => {
            let style = format!("filter:{};{}", css_filter(map.theme), map.mask.css_declarations());
            let _ = write!(
                out,
                r#"<image id="{}" {} preserveAspectRatio="xMidYMid slice" style="{}" xlink:href="{}"/>"#,
                id,
                map.rect.attrs(),
                escape_xml(&style),
                escape_xml(href)
            );
        }
        None => hidden_placeholder(out, id),
    }
}

/// Images that have not finished decoding are kept in the tree but invisible.
fn hidden_placeholder(out: &mut String, id: &str) {
    let _ = write!(out, r#"<g id="{}" opacity="0"/>"#, id);
}

/// Format a coordinate compactly: at most two decimals, no trailing zeros.
pub(crate) fn num(v: f32) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape text for XML content and attribute values.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
