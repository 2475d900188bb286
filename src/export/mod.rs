//! Export pipeline.
//!
//! Turns a composed poster into a self-contained image. One export runs at a
//! time per pipeline: the state moves `Idle → Capturing → Succeeded | Failed`
//! and a request arriving while `Capturing` is turned away without touching
//! the export in flight.
//!
//! The steps are:
//! 1. Snapshot the map layer, crop it to the map rectangle and cut it through
//!    the mask. Failure here is logged and the export continues without a map.
//! 2. Serialize the surface in capture mode and rasterize it at the requested
//!    size, then encode. Empty or mis-sized rasters count as failures.
//! 3. Retry step 2 under the pipeline's `RetryPolicy`.

mod artifact;
mod capture;
mod download;
mod retry;

use std::cell::Cell;

use tracing::{debug, info, warn};

use crate::error::{PosterError, Result};
use crate::render::{data_url, encode_jpeg, encode_png, MapSnapshot, RenderMode, Surface};

pub use artifact::{
    ExportArtifact, ExportOptions, ImageFormat, DEFAULT_PX_PER_CM, THUMBNAIL_QUALITY, THUMBNAIL_WIDTH,
};
pub use capture::{Capturer, ResvgCapturer};
pub use download::{filename, save};
pub use retry::{Exhausted, RetryPolicy, Sleeper, ThreadSleeper};

/// Something the pipeline can export.
pub trait Exportable {
    /// The surface to serialize, if one has been composed.
    fn surface(&self) -> Option<&Surface>;

    /// An off-screen raster of the map layer with the theme applied.
    fn snapshot_map_layer(&self) -> Result<MapSnapshot>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    Capturing,
    Succeeded,
    Failed,
}

/// Sets `Capturing` on creation; on drop, leaves `Succeeded` if marked,
/// `Failed` otherwise.
struct InFlight<'a> {
    state: &'a Cell<ExportState>,
    succeeded: bool,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a Cell<ExportState>) -> Self {
        state.set(ExportState::Capturing);
        Self {
            state,
            succeeded: false,
        }
    }

    fn succeed(mut self) {
        self.succeeded = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.set(if self.succeeded {
            ExportState::Succeeded
        } else {
            ExportState::Failed
        });
    }
}

/// Captures posters into encoded images.
#[derive(Debug)]
pub struct ExportPipeline<C: Capturer = ResvgCapturer, Z: Sleeper = ThreadSleeper> {
    capturer: C,
    sleeper: Z,
    retry: RetryPolicy,
    state: Cell<ExportState>,
}

impl ExportPipeline {
    /// resvg capture with system fonts, real sleeps, default retry policy.
    pub fn new() -> Self {
        Self::with_parts(ResvgCapturer::new(), ThreadSleeper, RetryPolicy::default())
    }
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Capturer, Z: Sleeper> ExportPipeline<C, Z> {
    pub fn with_parts(capturer: C, sleeper: Z, retry: RetryPolicy) -> Self {
        Self {
            capturer,
            sleeper,
            retry,
            state: Cell::new(ExportState::Idle),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn state(&self) -> ExportState {
        self.state.get()
    }

    pub fn is_capturing(&self) -> bool {
        self.state.get() == ExportState::Capturing
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn capturer(&self) -> &C {
        &self.capturer
    }

    pub fn sleeper(&self) -> &Z {
        &self.sleeper
    }

    /// Export `source` as described by `options`.
    pub fn export(&self, source: &dyn Exportable, options: &ExportOptions) -> Result<ExportArtifact> {
        if self.is_capturing() {
            return Err(PosterError::ExportInProgress);
        }
        let in_flight = InFlight::begin(&self.state);

        let surface = source.surface().ok_or(PosterError::NoSurface)?;
        let map = self.masked_map(source, surface, options);

        let artifact = self
            .retry
            .run(&self.sleeper, |attempt| {
                self.attempt(surface, map.as_deref(), options, attempt)
            })
            .map_err(|e| PosterError::Export {
                message: format!("gave up after {} attempts: {}", e.attempts, e.last),
            })?;

        in_flight.succeed();
        info!(
            width = artifact.width,
            height = artifact.height,
            bytes = artifact.bytes.len(),
            mime = artifact.mime(),
            "export complete"
        );
        Ok(artifact)
    }

    /// The masked map as a PNG data URL, or `None` if it could not be made.
    fn masked_map(
        &self,
        source: &dyn Exportable,
        surface: &Surface,
        options: &ExportOptions,
    ) -> Option<String> {
        let node = surface.map_node()?;

        let snapshot = match source.snapshot_map_layer() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "map snapshot failed, exporting without the map");
                return None;
            }
        };

        let scale = (options.width as f32 / surface.width).min(options.height as f32 / surface.height);
        let width = (node.rect.w * scale).round() as u32;
        let height = (node.rect.h * scale).round() as u32;

        match snapshot
            .masked(&node.mask, width, height)
            .and_then(|img| encode_png(&img))
        {
            Ok(png) => Some(data_url("image/png", &png)),
            Err(e) => {
                warn!(error = %e, "map masking failed, exporting without the map");
                None
            }
        }
    }

    fn attempt(
        &self,
        surface: &Surface,
        map: Option<&str>,
        options: &ExportOptions,
        attempt: u32,
    ) -> Result<ExportArtifact> {
        debug!(attempt, width = options.width, height = options.height, "capturing surface");

        let svg = surface.to_svg(options.width, options.height, RenderMode::Capture { map });
        let raster = self.capturer.capture(&svg, options.width, options.height)?;

        if raster.width() == 0 || raster.height() == 0 {
            return Err(PosterError::render("capture produced an empty raster"));
        }
        if raster.dimensions() != (options.width, options.height) {
            return Err(PosterError::render(format!(
                "capture produced {}x{}, expected {}x{}",
                raster.width(),
                raster.height(),
                options.width,
                options.height
            )));
        }

        let bytes = match options.format {
            ImageFormat::Png => encode_png(&raster)?,
            ImageFormat::Jpeg { quality } => encode_jpeg(&raster, quality)?,
        };
        if bytes.is_empty() {
            return Err(PosterError::render("encoder produced no data"));
        }

        Ok(ExportArtifact {
            format: options.format,
            width: options.width,
            height: options.height,
            bytes,
        })
    }
}
