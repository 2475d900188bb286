//! Set command implementation.
//!
//! Applies any number of setters in a fixed order, then prints the result.
//! Unknown identifiers fall back to their defaults with a warning.

use std::path::Path;

use clap::Args;

use crate::catalog::ShapeCatalog;
use crate::error::{PosterError, Result};
use crate::location::SearchResult;
use crate::output::Printer;
use crate::style::StyleId;
use crate::types::{Background, Frame, Orientation, PosterSize, Step, TextUpdate, Theme, Units};

use super::show::print_summary;
use super::Project;

/// Change the configuration
#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// Title line
    #[arg(long)]
    pub title: Option<String>,

    /// Name/city line
    #[arg(long)]
    pub divider: Option<String>,

    /// Coordinates caption
    #[arg(long)]
    pub coords: Option<String>,

    /// Date line
    #[arg(long)]
    pub date: Option<String>,

    /// Map centre latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Map centre longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Map zoom (1-16)
    #[arg(long, allow_hyphen_values = true)]
    pub zoom: Option<f64>,

    /// Select a place by display name; requires --lat and --lng
    #[arg(long, requires_all = ["lat", "lng"])]
    pub place: Option<String>,

    /// Map colour theme
    #[arg(long)]
    pub theme: Option<String>,

    /// Text style
    #[arg(long)]
    pub style: Option<String>,

    /// Shape catalog id
    #[arg(long)]
    pub shape: Option<String>,

    /// Background
    #[arg(long)]
    pub background: Option<String>,

    /// portrait or landscape
    #[arg(long)]
    pub orientation: Option<String>,

    /// Poster size in centimetres, e.g. 30x40
    #[arg(long)]
    pub size: Option<String>,

    /// none, frame or hanger
    #[arg(long)]
    pub frame: Option<String>,

    /// cm or inch
    #[arg(long)]
    pub units: Option<String>,

    /// Active editor step
    #[arg(long)]
    pub step: Option<String>,

    /// Toggle the title line
    #[arg(long)]
    pub toggle_title: bool,

    /// Toggle the name/city line
    #[arg(long)]
    pub toggle_name: bool,

    /// Toggle the coordinates line
    #[arg(long)]
    pub toggle_coords: bool,

    /// Toggle the date line
    #[arg(long)]
    pub toggle_date: bool,

    /// Toggle hiding the whole text block
    #[arg(long)]
    pub toggle_hide_text: bool,

    /// Toggle removing the text block from the product
    #[arg(long)]
    pub toggle_remove_text: bool,
}

pub fn run(args: SetArgs, dir: &Path, printer: &Printer) -> Result<()> {
    let mut project = Project::open(dir)?;
    let store = &mut project.store;

    let current = store.snapshot().location;
    match (&args.place, args.lat, args.lng) {
        (Some(place), Some(lat), Some(lng)) => store.select_location(&SearchResult {
            id: place.clone(),
            display_name: place.clone(),
            center: [lng, lat],
        }),
        (None, Some(lat), Some(lng)) => store.set_coords(lat, lng),
        (None, Some(lat), None) => store.set_coords(lat, current.lng),
        (None, None, Some(lng)) => store.set_coords(current.lat, lng),
        _ => {}
    }
    if let Some(zoom) = args.zoom {
        store.set_zoom(zoom);
    }

    if let Some(id) = &args.theme {
        store.set_theme(resolve(printer, "theme", id, Theme::from_id, Theme::id));
    }
    if let Some(id) = &args.style {
        store.set_style(resolve(printer, "style", id, StyleId::from_id, StyleId::id));
    }
    if let Some(id) = &args.shape {
        if !ShapeCatalog::builtin().contains(id) {
            printer.warning("Unknown", &format!("shape '{}', the default stencil will be used", id));
        }
        store.set_shape(id.as_str());
    }
    if let Some(id) = &args.background {
        store.set_background(resolve(printer, "background", id, Background::from_id, Background::id));
    }
    if let Some(id) = &args.orientation {
        store.set_orientation(resolve(printer, "orientation", id, Orientation::from_id, Orientation::id));
    }
    if let Some(raw) = &args.size {
        let size = PosterSize::parse(raw).ok_or_else(|| PosterError::Parse {
            message: format!("Invalid size: {}", raw),
            help: Some("Use WIDTHxHEIGHT in centimetres, e.g. 30x40".to_string()),
        })?;
        store.set_size(size);
    }
    if let Some(id) = &args.frame {
        store.set_frame(resolve(printer, "frame", id, Frame::from_id, Frame::id));
    }
    if let Some(id) = &args.units {
        store.set_units(resolve(printer, "units", id, Units::from_id, Units::id));
    }
    if let Some(id) = &args.step {
        store.set_active_step(resolve(printer, "step", id, Step::from_id, Step::id));
    }

    if args.title.is_some() || args.divider.is_some() || args.coords.is_some() {
        store.set_text(TextUpdate {
            title: args.title,
            divider: args.divider,
            subtitle: args.coords,
            date: None,
        });
    }
    if let Some(date) = args.date {
        store.set_date(date);
    }

    if args.toggle_title {
        store.toggle_title();
    }
    if args.toggle_name {
        store.toggle_name_city();
    }
    if args.toggle_coords {
        store.toggle_coords();
    }
    if args.toggle_date {
        store.toggle_date();
    }
    if args.toggle_hide_text {
        store.toggle_hide_text();
    }
    if args.toggle_remove_text {
        store.toggle_remove_text();
    }

    printer.status("Updated", &crate::output::display_path(store.storage().dir()));
    print_summary(store.snapshot(), printer);
    Ok(())
}

/// Parse `id` with `parse`, warning when it fell back to a different value.
fn resolve<T: Copy>(
    printer: &Printer,
    what: &str,
    id: &str,
    parse: fn(&str) -> T,
    canonical: fn(T) -> &'static str,
) -> T {
    let value = parse(id);
    if !canonical(value).eq_ignore_ascii_case(id.trim()) {
        printer.warning(
            "Unknown",
            &format!("{} '{}', using '{}'", what, id, canonical(value)),
        );
    }
    value
}
