//! Cart command implementation.
//!
//! Exports a thumbnail, builds the cart line and prints it as JSON on stdout.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Args;

use crate::cart::{CartSink, JsonLinesCart, MemoryCart};
use crate::error::{PosterError, Result};
use crate::output::{display_path, Printer};
use crate::pricing::format_price;

use super::Project;

/// Export a thumbnail and emit a cart line
#[derive(Args, Debug)]
pub struct CartArgs {
    /// Append the line to this JSON-lines file instead of only printing it
    #[arg(long)]
    pub append: Option<PathBuf>,

    /// Thumbnail width in pixels
    #[arg(long)]
    pub width: Option<u32>,
}

pub fn run(args: CartArgs, dir: &Path, printer: &Printer) -> Result<()> {
    let mut project = Project::open(dir)?;
    if let Some(width) = args.width {
        project.settings.thumbnail_width = width;
    }

    let editor = project.into_editor();
    let mut memory = MemoryCart::default();
    let mut file = args.append.as_ref().map(JsonLinesCart::new);
    let sink: &mut dyn CartSink = match file.as_mut() {
        Some(file) => file,
        None => &mut memory,
    };

    let line = editor.add_to_cart(sink, Utc::now())?;

    let json = serde_json::to_string_pretty(&line).map_err(|e| PosterError::Storage {
        message: format!("Failed to serialize cart line: {}", e),
    })?;
    println!("{}", json);

    printer.success(
        "Added",
        &format!("{} · {} · {}", line.display_name, line.variant_label, format_price(line.price)),
    );
    if let Some(path) = &args.append {
        printer.info("Cart", &display_path(path));
    }
    Ok(())
}
