//! Render command implementation.
//!
//! Exports the current poster at print resolution and saves it under its
//! download name.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::Result;
use crate::export;
use crate::output::{display_path, Printer};

use super::Project;

/// Export the poster as a full-size PNG
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Output directory (default: from poster.yaml, else dist)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Pixels per centimetre
    #[arg(long)]
    pub px_per_cm: Option<u32>,

    /// Also write the preview SVG next to the PNG
    #[arg(long)]
    pub svg: bool,
}

pub fn run(args: RenderArgs, dir: &Path, printer: &Printer) -> Result<()> {
    let mut project = Project::open(dir)?;
    if let Some(px_per_cm) = args.px_per_cm {
        project.settings.px_per_cm = px_per_cm;
    }
    let output = args.output.unwrap_or_else(|| project.settings.output.clone());

    let editor = project.into_editor();
    let config = editor.store().snapshot();
    let (w, h) = config.dimensions_cm();
    printer.status("Rendering", &format!("{}×{} cm poster", w, h));

    let path = editor.download(&output)?;

    if args.svg {
        let svg_path = path.with_extension("svg");
        std::fs::write(&svg_path, editor.view().surface.preview_svg()).map_err(|e| {
            crate::error::PosterError::Io {
                path: svg_path.clone(),
                message: format!("Failed to write preview: {}", e),
            }
        })?;
        printer.success("Wrote", &display_path(&svg_path));
    }

    printer.success("Wrote", &display_path(&path));
    printer.info("Filename", &export::filename(&config.text.title, "png"));
    Ok(())
}
