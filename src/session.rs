//! Editing session.
//!
//! An `Editor` ties the configuration store to the compositor and the export
//! pipeline. The two user-triggered exports live here: download (full-size
//! PNG) and add-to-cart (JPEG thumbnail plus a cart line). Neither touches the
//! configuration, whether it succeeds or fails.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::cart::{CartLine, CartSink};
use crate::error::Result;
use crate::export::{
    self, Capturer, ExportArtifact, ExportOptions, ExportPipeline, ResvgCapturer, Sleeper,
    ThreadSleeper, DEFAULT_PX_PER_CM, THUMBNAIL_WIDTH,
};
use crate::render::{PosterCompositor, PosterView};
use crate::store::{ConfigStore, Storage};

pub struct Editor<S: Storage, C: Capturer = ResvgCapturer, Z: Sleeper = ThreadSleeper> {
    store: ConfigStore<S>,
    compositor: PosterCompositor,
    pipeline: ExportPipeline<C, Z>,
    px_per_cm: u32,
    thumbnail_width: u32,
}

impl<S: Storage> Editor<S> {
    pub fn new(store: ConfigStore<S>, compositor: PosterCompositor) -> Self {
        Self::with_pipeline(store, compositor, ExportPipeline::new())
    }
}

impl<S: Storage, C: Capturer, Z: Sleeper> Editor<S, C, Z> {
    pub fn with_pipeline(
        store: ConfigStore<S>,
        compositor: PosterCompositor,
        pipeline: ExportPipeline<C, Z>,
    ) -> Self {
        Self {
            store,
            compositor,
            pipeline,
            px_per_cm: DEFAULT_PX_PER_CM,
            thumbnail_width: THUMBNAIL_WIDTH,
        }
    }

    /// Override export resolution.
    pub fn with_resolution(mut self, px_per_cm: u32, thumbnail_width: u32) -> Self {
        self.px_per_cm = px_per_cm;
        self.thumbnail_width = thumbnail_width;
        self
    }

    pub fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConfigStore<S> {
        &mut self.store
    }

    pub fn compositor(&self) -> &PosterCompositor {
        &self.compositor
    }

    pub fn pipeline(&self) -> &ExportPipeline<C, Z> {
        &self.pipeline
    }

    /// Compose the current configuration.
    pub fn view(&self) -> PosterView {
        self.compositor.compose(self.store.snapshot())
    }

    pub fn export_full(&self) -> Result<ExportArtifact> {
        let options = ExportOptions::full(self.store.snapshot(), self.px_per_cm)?;
        self.pipeline.export(&self.view(), &options)
    }

    pub fn export_thumbnail(&self) -> Result<ExportArtifact> {
        let options = ExportOptions::thumbnail(self.store.snapshot(), self.thumbnail_width);
        self.pipeline.export(&self.view(), &options)
    }

    /// Export at full size and save under the download name in `dir`.
    pub fn download(&self, dir: &Path) -> Result<PathBuf> {
        let artifact = self.export_full()?;
        export::save(&artifact, dir, &self.store.snapshot().text.title)
    }

    /// Export a thumbnail and hand a cart line to `sink`.
    pub fn add_to_cart(&self, sink: &mut dyn CartSink, now: DateTime<Utc>) -> Result<CartLine> {
        let thumbnail = self.export_thumbnail()?;
        let line = CartLine::new(self.store.snapshot(), thumbnail.to_data_url(), now);
        sink.add(line.clone())?;
        info!(id = %line.artifact_id, price = line.price, "added to cart");
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    use super::*;
    use crate::cart::MemoryCart;
    use crate::catalog::ShapeCatalog;
    use crate::error::PosterError;
    use crate::export::RetryPolicy;
    use crate::render::AssetStore;
    use crate::store::MemoryStorage;

    struct NoSleep;

    impl Sleeper for NoSleep {
        fn sleep(&self, _delay: Duration) {}
    }

    struct Solid {
        fail: bool,
        calls: Cell<u32>,
    }

    impl Capturer for Solid {
        fn capture(&self, _svg: &str, width: u32, height: u32) -> Result<RgbaImage> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(PosterError::render("offline"));
            }
            Ok(RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255])))
        }
    }

    fn editor(fail: bool) -> Editor<MemoryStorage, Solid, NoSleep> {
        Editor::with_pipeline(
            ConfigStore::open(MemoryStorage::new()),
            PosterCompositor::new(ShapeCatalog::builtin(), AssetStore::new()),
            ExportPipeline::with_parts(
                Solid {
                    fail,
                    calls: Cell::new(0),
                },
                NoSleep,
                RetryPolicy::default(),
            ),
        )
        .with_resolution(2, 30)
    }

    #[test]
    fn test_download_writes_named_png() {
        let dir = tempdir().unwrap();
        let mut editor = editor(false);
        editor.store_mut().set_text(crate::types::TextUpdate {
            title: Some("Old Town".into()),
            ..Default::default()
        });

        let path = editor.download(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "map-of-love-old-town.png");
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (60, 80));
    }

    #[test]
    fn test_add_to_cart() {
        let editor = editor(false);
        let mut cart = MemoryCart::default();
        let line = editor.add_to_cart(&mut cart, Utc::now()).unwrap();

        assert_eq!(cart.lines, vec![line.clone()]);
        assert_eq!(line.price, 3490);
        assert!(line.thumbnail.starts_with("data:image/jpeg;base64,"));
        assert!(line.artifact_id.starts_with("poster_"));
    }

    #[test]
    fn test_failed_export_leaves_configuration_untouched() {
        let editor = editor(true);
        let before = editor.store().snapshot().clone();
        let writes = editor.store().storage().writes();

        let err = editor.export_full().unwrap_err();
        assert!(matches!(err, PosterError::Export { .. }));
        assert_eq!(editor.pipeline().capturer().calls.get(), 3);
        assert_eq!(editor.store().snapshot(), &before);
        assert_eq!(editor.store().storage().writes(), writes);
    }
}
