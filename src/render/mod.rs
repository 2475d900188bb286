//! Rendering module for poster.
//!
//! This module composes a configuration into a layered surface and provides
//! the raster helpers the export pipeline needs: theme filters, the map
//! snapshot, and PNG/JPEG encoding.

mod assets;
mod compositor;
mod map;
mod png;
mod surface;
mod text;
pub mod theme;

pub use assets::{Asset, AssetStore, DecodedImage};
pub use compositor::{surface_size, PosterCompositor, PosterView, MAP_INSET, SHORT_EDGE};
pub use map::{MapLayer, MapSnapshot};
pub use png::{data_url, encode_jpeg, encode_png, flatten_on_white, write_image};
pub use surface::{Fit, ImageNode, MapNode, Node, NodeContent, NodeKind, Rect, RenderMode, Surface};
pub use text::{block_height, layout, markup as text_markup, section_text, PlacedText};
