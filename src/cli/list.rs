//! Shape and style listings.

use clap::Args;

use crate::catalog::ShapeCatalog;
use crate::error::{PosterError, Result};
use crate::output::{plural, Printer};
use crate::style::StyleId;

/// List a catalog
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the listing as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(serde::Serialize)]
struct Item<'a> {
    id: &'a str,
    label: &'a str,
}

pub fn shapes(args: ListArgs, printer: &Printer) -> Result<()> {
    let catalog = ShapeCatalog::builtin();
    let items: Vec<Item> = catalog
        .iter()
        .map(|s| Item {
            id: s.id,
            label: s.label,
        })
        .collect();
    emit(&items, args.json, "shape", "shapes", printer)
}

pub fn styles(args: ListArgs, printer: &Printer) -> Result<()> {
    let items: Vec<Item> = StyleId::ALL
        .iter()
        .map(|s| Item {
            id: s.id(),
            label: s.label(),
        })
        .collect();
    emit(&items, args.json, "style", "styles", printer)
}

fn emit(items: &[Item], json: bool, singular: &str, pluralized: &str, printer: &Printer) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(items).map_err(|e| PosterError::Storage {
            message: format!("Failed to serialize listing: {}", e),
        })?;
        println!("{}", out);
        return Ok(());
    }

    printer.status("Listing", &plural(items.len(), singular, pluralized));
    for item in items {
        println!("{:<14} {}", item.id, printer.dim(item.label));
    }
    Ok(())
}
