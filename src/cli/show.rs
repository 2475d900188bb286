//! Show command implementation.

use std::path::Path;

use clap::Args;

use crate::error::{PosterError, Result};
use crate::output::Printer;
use crate::pricing;
use crate::types::Configuration;

use super::Project;

/// Print the current configuration and price
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print the configuration as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs, dir: &Path, printer: &Printer) -> Result<()> {
    let project = Project::open(dir)?;
    let config = project.store.snapshot();

    if args.json {
        let json = serde_json::to_string_pretty(config).map_err(|e| PosterError::Storage {
            message: format!("Failed to serialize configuration: {}", e),
        })?;
        println!("{}", json);
        return Ok(());
    }

    print_summary(config, printer);
    Ok(())
}

pub(crate) fn print_summary(config: &Configuration, printer: &Printer) {
    let (w, h) = config.dimensions_cm();
    let loc = config.location;

    printer.info(
        "Location",
        &format!("{:.4}, {:.4} {}", loc.lat, loc.lng, printer.dim(&format!("zoom {}", loc.zoom))),
    );
    printer.info(
        "Design",
        &format!(
            "{} shape, {} theme, {} style, {} background",
            config.shape,
            config.theme.id(),
            config.style.id(),
            config.background.id()
        ),
    );
    printer.info(
        "Format",
        &format!(
            "{}×{} cm {}, {}",
            w,
            h,
            config.orientation.id(),
            config.frame.label()
        ),
    );

    let text = &config.text;
    let vis = config.visibility;
    let line = |shown: bool, value: &str| {
        if shown && vis.text_block_visible() {
            value.to_string()
        } else {
            printer.dim(&format!("({} hidden)", value))
        }
    };
    printer.info("Title", &line(vis.show_title, &text.title));
    printer.info("Name", &line(vis.show_name_city, &text.divider));
    printer.info("Coords", &line(vis.show_coords, &text.subtitle));
    printer.info("Date", &line(vis.show_date, &text.date));
    if vis.remove_text {
        printer.warning("Text", "removed from the product");
    }

    let listed = if pricing::is_listed(config.size) {
        String::new()
    } else {
        printer.dim(" (unlisted size, base price of the default)")
    };
    printer.status("Price", &format!("{}{}", printer.bold(&pricing::format_price(config.price)), listed));
}
