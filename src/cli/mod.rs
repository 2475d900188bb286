pub mod cart;
pub mod completions;
pub mod list;
pub mod render;
pub mod reset;
pub mod set;
pub mod show;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::ShapeCatalog;
use crate::error::Result;
use crate::export::ExportPipeline;
use crate::render::{AssetStore, PosterCompositor};
use crate::session::Editor;
use crate::settings::Settings;
use crate::store::{ConfigStore, FileStorage};

/// poster - Map poster configurator and exporter
#[derive(Parser, Debug)]
#[command(name = "poster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project directory containing poster.yaml
    #[arg(long, short = 'C', global = true, default_value = ".")]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current configuration and price
    Show(show::ShowArgs),

    /// Change the configuration
    Set(set::SetArgs),

    /// Restore the default configuration
    Reset,

    /// Export the poster as a full-size PNG
    Render(render::RenderArgs),

    /// Export a thumbnail and emit a cart line
    Cart(cart::CartArgs),

    /// List available shapes
    Shapes(list::ListArgs),

    /// List available text styles
    Styles(list::ListArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Settings plus the persisted session of one project directory.
pub struct Project {
    pub settings: Settings,
    pub store: ConfigStore<FileStorage>,
}

impl Project {
    pub fn open(dir: &Path) -> Result<Self> {
        let settings = Settings::discover(dir)?;
        let store = ConfigStore::open(FileStorage::new(settings.state_dir.clone()));
        Ok(Self { settings, store })
    }

    /// An editor over this project with assets loaded from the settings.
    pub fn into_editor(self) -> Editor<FileStorage> {
        let assets = AssetStore::load(self.settings.map.as_deref(), self.settings.backgrounds.as_deref());
        let compositor = PosterCompositor::new(ShapeCatalog::builtin(), assets);
        let pipeline = ExportPipeline::new().with_retry(self.settings.export.retry_policy());
        Editor::with_pipeline(self.store, compositor, pipeline)
            .with_resolution(self.settings.px_per_cm, self.settings.thumbnail_width)
    }
}
