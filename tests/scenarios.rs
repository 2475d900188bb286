//! End-to-end scenarios over the public API.

use std::cell::Cell;
use std::time::Duration;

use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use poster::render::Asset;
use poster::{
    AssetStore, Capturer, CartSink, ConfigStore, Configuration, Editor, ExportPipeline, ExportState,
    FileStorage, Frame, JsonLinesCart, MemoryStorage, PosterCompositor, PosterError, PosterSize,
    ResvgCapturer, RetryPolicy, SearchResult, ShapeCatalog, Sleeper, StyleId, Theme,
};

struct NoSleep;

impl Sleeper for NoSleep {
    fn sleep(&self, _delay: Duration) {}
}

fn compositor() -> PosterCompositor {
    let map = RgbaImage::from_pixel(24, 24, Rgba([40, 90, 140, 255]));
    PosterCompositor::new(
        ShapeCatalog::builtin(),
        AssetStore::new().with_map(Asset::ready(map).unwrap()),
    )
}

#[test]
fn price_follows_size_and_frame() {
    let mut store = ConfigStore::open(MemoryStorage::new());
    assert_eq!(store.snapshot().price, 3490);

    store.set_frame(Frame::Frame);
    assert_eq!(store.snapshot().price, 4390);

    store.set_size(PosterSize::new(50, 70));
    store.set_frame(Frame::Hanger);
    assert_eq!(store.snapshot().price, 5990);

    store.set_size(PosterSize::new(33, 33));
    assert_eq!(store.snapshot().price, 3490 + 500);
}

#[test]
fn zoom_is_clamped() {
    let mut store = ConfigStore::open(MemoryStorage::new());
    store.set_zoom(20.0);
    assert_eq!(store.snapshot().location.zoom, 16.0);
    store.set_zoom(-5.0);
    assert_eq!(store.snapshot().location.zoom, 1.0);
}

#[test]
fn session_survives_restart() {
    let dir = tempdir().unwrap();

    let mut store = ConfigStore::open(FileStorage::new(dir.path()));
    store.set_theme(Theme::Purple);
    store.set_style(StyleId::Japandi);
    store.select_location(&SearchResult {
        id: "1".into(),
        display_name: "Lisbon, Portugal".into(),
        center: [-9.1393, 38.7223],
    });
    let saved = store.snapshot().clone();

    let reopened = ConfigStore::open(FileStorage::new(dir.path()));
    assert_eq!(reopened.snapshot(), &saved);
    assert_eq!(reopened.snapshot().text.title, "LISBON");
    assert_eq!(reopened.snapshot().text.subtitle, "38.7223°N / -9.1393°E");
    assert_eq!(reopened.snapshot().location.zoom, 11.0);
}

#[test]
fn corrupt_session_falls_back_to_defaults() {
    let storage = MemoryStorage::new().with_slot(poster::STORAGE_KEY, "{not json");
    let store = ConfigStore::open(storage);
    assert_eq!(store.snapshot(), &Configuration::default());
}

#[test]
fn unknown_shape_and_style_render_with_fallbacks() {
    let compositor = compositor();
    let mut config = Configuration::default();
    config.shape = "octagon".into();
    config.style = StyleId::from_id("brutalist");

    let view = compositor.compose(&config);
    assert!(view.map.mask.is_fallback());
    assert_eq!(view.template.id, StyleId::Classic);
}

#[test]
fn compose_twice_is_identical() {
    let compositor = compositor();
    let mut config = Configuration::default();
    config.theme = Theme::Red;
    config.frame = Frame::Hanger;

    assert_eq!(
        compositor.compose(&config).surface.preview_svg(),
        compositor.compose(&config).surface.preview_svg()
    );
}

#[test]
fn title_toggle_hides_only_the_title() {
    let compositor = compositor();
    let mut store = ConfigStore::open(MemoryStorage::new());
    let before = compositor.compose(store.snapshot()).surface.preview_svg();

    store.toggle_title();
    let after = compositor.compose(store.snapshot()).surface.preview_svg();

    assert!(before.contains(">PARIS<"));
    assert!(!after.contains(">PARIS<"));
    for kept in [">France<", ">01.01.2025<"] {
        assert!(after.contains(kept), "{kept} should still be drawn");
    }
}

struct Flaky {
    failures: u32,
    calls: Cell<u32>,
}

impl Capturer for Flaky {
    fn capture(&self, _svg: &str, width: u32, height: u32) -> poster::Result<RgbaImage> {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n <= self.failures {
            Err(PosterError::Render {
                message: format!("transient {n}"),
            })
        } else {
            Ok(RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])))
        }
    }
}

#[test]
fn export_retries_then_gives_up() {
    let config = Configuration::default();
    let view = compositor().compose(&config);
    let options = poster::ExportOptions::thumbnail(&config, 30);

    let pipeline = ExportPipeline::with_parts(
        Flaky {
            failures: 2,
            calls: Cell::new(0),
        },
        NoSleep,
        RetryPolicy::default(),
    );
    assert!(pipeline.export(&view, &options).is_ok());
    assert_eq!(pipeline.capturer().calls.get(), 3);

    let pipeline = ExportPipeline::with_parts(
        Flaky {
            failures: 3,
            calls: Cell::new(0),
        },
        NoSleep,
        RetryPolicy::default(),
    );
    let err = pipeline.export(&view, &options).unwrap_err();
    assert!(matches!(err, PosterError::Export { .. }));
    assert_eq!(pipeline.state(), ExportState::Failed);
}

#[test]
fn cart_line_written_to_file() {
    let dir = tempdir().unwrap();
    let mut store = ConfigStore::open(MemoryStorage::new());
    store.set_frame(Frame::Frame);
    store.toggle_remove_text();

    let editor = Editor::with_pipeline(
        store,
        compositor(),
        ExportPipeline::with_parts(ResvgCapturer::without_fonts(), NoSleep, RetryPolicy::default()),
    )
    .with_resolution(2, 60);

    let mut cart = JsonLinesCart::new(dir.path().join("cart.jsonl"));
    let sink: &mut dyn CartSink = &mut cart;
    let line = editor.add_to_cart(sink, chrono::Utc::now()).unwrap();

    assert_eq!(line.price, 4390);
    assert_eq!(line.variant_label, "30×40 cm, Frame");
    assert!(line.text_removed);

    let written = std::fs::read_to_string(cart.path()).unwrap();
    assert!(written.contains("\"price\":4390"));
}

#[test]
fn oversized_download_is_an_error_not_a_panic() {
    let dir = tempdir().unwrap();
    let editor = Editor::with_pipeline(
        ConfigStore::open(MemoryStorage::new()),
        compositor(),
        ExportPipeline::with_parts(ResvgCapturer::without_fonts(), NoSleep, RetryPolicy::default()),
    )
    .with_resolution(u32::MAX, 60);

    let err = editor.download(dir.path()).unwrap_err();
    assert!(matches!(err, PosterError::Export { .. }));
    assert_eq!(editor.pipeline().state(), ExportState::Idle);
}
