//! poster - Map poster configurator and exporter
//!
//! A library for composing personalised map posters (shape-masked map,
//! colour theme, background, frame and a styled text block), pricing them, and
//! exporting them as print-ready PNGs or cart thumbnails.

pub mod cart;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod export;
pub mod location;
pub mod mask;
pub mod output;
pub mod pricing;
pub mod render;
pub mod session;
pub mod settings;
pub mod store;
pub mod style;
pub mod types;

pub use cart::{CartLine, CartSink, JsonLinesCart, MemoryCart};
pub use catalog::{ShapeCatalog, ShapeEntry, DEFAULT_SHAPE_ID};
pub use error::{PosterError, Result};
pub use export::{
    Capturer, ExportArtifact, ExportOptions, ExportPipeline, ExportState, Exportable, ImageFormat,
    ResvgCapturer, RetryPolicy, Sleeper, ThreadSleeper,
};
pub use location::{DebouncedSearch, LocationSearch, SearchResult, StubGeocoder};
pub use mask::{build_mask, sanitize_outline, MaskPrimitive};
pub use render::{AssetStore, PosterCompositor, PosterView, Surface};
pub use session::Editor;
pub use settings::Settings;
pub use store::{ConfigStore, FileStorage, MemoryStorage, Storage, STORAGE_KEY};
pub use style::{resolve as resolve_style, StyleId, Template};
pub use types::{
    Background, Colour, Configuration, Frame, Location, Orientation, PosterSize, Step, TextFields,
    TextUpdate, Theme, Units, Visibility,
};
