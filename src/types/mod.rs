//! Core domain types for poster.
//!
//! - `Colour` - opaque colours used across the render layers
//! - `Configuration` - the full set of user choices for one poster

mod colour;
mod config;

pub use colour::Colour;
pub use config::{
    Background, Configuration, Frame, Location, Orientation, PosterSize, Step, TextFields,
    TextUpdate, Theme, Units, Visibility, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM,
};
