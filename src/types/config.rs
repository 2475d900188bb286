//! The poster configuration record and its enumerated choices.
//!
//! Every choice that arrives as a string identifier (from the CLI, from the
//! persisted slot, from a UI) is parsed through `from_id`, which never fails:
//! unknown identifiers resolve to the documented default for that choice.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::style::StyleId;

/// Colour filter applied to the map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Theme {
    #[default]
    White,
    Red,
    Green,
    Yellow,
    Purple,
    Blue,
    Black,
}

impl From<String> for Theme {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::White,
        Theme::Red,
        Theme::Green,
        Theme::Yellow,
        Theme::Purple,
        Theme::Blue,
        Theme::Black,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Theme::White => "white",
            Theme::Red => "red",
            Theme::Green => "green",
            Theme::Yellow => "yellow",
            Theme::Purple => "purple",
            Theme::Blue => "blue",
            Theme::Black => "black",
        }
    }

    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(id.trim()))
            .unwrap_or_default()
    }
}

/// Backing material behind the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Background {
    #[default]
    White,
    Wood,
    Marble,
    Fabric,
    Paper,
}

impl From<String> for Background {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl Background {
    pub const ALL: [Background; 5] = [
        Background::White,
        Background::Wood,
        Background::Marble,
        Background::Fabric,
        Background::Paper,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Background::White => "white",
            Background::Wood => "wood",
            Background::Marble => "marble",
            Background::Fabric => "fabric",
            Background::Paper => "paper",
        }
    }

    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|b| b.id().eq_ignore_ascii_case(id.trim()))
            .unwrap_or_default()
    }

    /// Whether this material is drawn from a tiled image rather than a flat fill.
    pub fn is_textured(self) -> bool {
        self != Background::White
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl From<String> for Orientation {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl Orientation {
    pub fn from_id(id: &str) -> Self {
        if id.trim().eq_ignore_ascii_case("landscape") {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Physical finishing option. Adds to the price, never to the layout maths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Frame {
    #[default]
    None,
    Frame,
    Hanger,
}

impl From<String> for Frame {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl Frame {
    pub const ALL: [Frame; 3] = [Frame::None, Frame::Frame, Frame::Hanger];

    pub fn id(self) -> &'static str {
        match self {
            Frame::None => "none",
            Frame::Frame => "frame",
            Frame::Hanger => "hanger",
        }
    }

    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|f| f.id().eq_ignore_ascii_case(id.trim()))
            .unwrap_or_default()
    }

    /// Human label used on cart lines.
    pub fn label(self) -> &'static str {
        match self {
            Frame::None => "no frame",
            Frame::Frame => "Frame",
            Frame::Hanger => "Hanger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Units {
    #[default]
    Cm,
    Inch,
}

impl From<String> for Units {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl Units {
    pub fn id(self) -> &'static str {
        match self {
            Units::Cm => "cm",
            Units::Inch => "inch",
        }
    }

    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "inch" | "in" => Units::Inch,
            _ => Units::Cm,
        }
    }
}

/// Which configuration panel the user is looking at. Has no effect on rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Step {
    #[default]
    Background,
    Location,
    Titles,
    Theme,
    Shape,
    Size,
}

impl From<String> for Step {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Background,
        Step::Location,
        Step::Titles,
        Step::Theme,
        Step::Shape,
        Step::Size,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Step::Background => "background",
            Step::Location => "location",
            Step::Titles => "titles",
            Step::Theme => "theme",
            Step::Shape => "shape",
            Step::Size => "size",
        }
    }

    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.id().eq_ignore_ascii_case(id.trim()))
            .unwrap_or_default()
    }
}

/// Poster dimensions in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PosterSize {
    pub w: u32,
    pub h: u32,
}

impl PosterSize {
    /// Longest edge accepted for either dimension.
    pub const MAX_EDGE_CM: u32 = 1000;

    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Both edges are in `1..=MAX_EDGE_CM`.
    pub fn is_valid(self) -> bool {
        let edge = 1..=Self::MAX_EDGE_CM;
        edge.contains(&self.w) && edge.contains(&self.h)
    }

    /// Parse `WxH` (also accepts `×`), e.g. `30x40`.
    pub fn parse(s: &str) -> Option<Self> {
        let normalised = s.trim().to_ascii_lowercase().replace('×', "x");
        let (w, h) = normalised.split_once('x')?;
        let size = Self {
            w: w.trim().parse().ok()?,
            h: h.trim().parse().ok()?,
        };
        size.is_valid().then_some(size)
    }

    /// The (short, long) edges regardless of how the pair was written.
    pub fn edges(self) -> (u32, u32) {
        (self.w.min(self.h), self.w.max(self.h))
    }

    /// (width, height) of the poster once `orientation` is applied.
    pub fn oriented(self, orientation: Orientation) -> (u32, u32) {
        let (short, long) = self.edges();
        match orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

impl Default for PosterSize {
    fn default() -> Self {
        crate::pricing::DEFAULT_SIZE
    }
}

impl fmt::Display for PosterSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.w, self.h)
    }
}

/// Map centre and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub zoom: f64,
}

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 16.0;
pub const DEFAULT_ZOOM: f64 = 11.0;

impl Location {
    /// Clamp a requested zoom into range; NaN becomes the default zoom.
    pub fn clamp_zoom(zoom: f64) -> f64 {
        if zoom.is_nan() {
            DEFAULT_ZOOM
        } else {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            lat: 48.8566,
            lng: 2.3522,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// The four text sections of the poster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFields {
    pub title: String,
    /// Name/city line rendered by the divider section.
    pub divider: String,
    /// Coordinate caption.
    pub subtitle: String,
    pub date: String,
}

impl Default for TextFields {
    fn default() -> Self {
        Self {
            title: "PARIS".to_string(),
            divider: "France".to_string(),
            subtitle: "48.8566°N / 2.3522°E".to_string(),
            date: "01.01.2025".to_string(),
        }
    }
}

/// Partial text update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextUpdate {
    pub title: Option<String>,
    pub divider: Option<String>,
    pub subtitle: Option<String>,
    pub date: Option<String>,
}

/// Independent visibility switches for the text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visibility {
    pub show_title: bool,
    pub show_name_city: bool,
    pub show_date: bool,
    pub show_coords: bool,
    /// Suppress the whole text block in the render.
    pub hide_text: bool,
    /// Drop the text block from the product altogether.
    pub remove_text: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            show_title: true,
            show_name_city: true,
            show_date: true,
            show_coords: true,
            hide_text: false,
            remove_text: false,
        }
    }
}

impl Visibility {
    /// Whether any text is drawn at all.
    pub fn text_block_visible(self) -> bool {
        !self.hide_text && !self.remove_text
    }
}

/// Every user choice for one poster, plus the derived price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub location: Location,
    pub theme: Theme,
    pub background: Background,
    /// Shape catalog id; resolved through the catalog with a fallback.
    pub shape: String,
    pub orientation: Orientation,
    pub style: StyleId,
    pub units: Units,
    pub size: PosterSize,
    pub frame: Frame,
    pub text: TextFields,
    pub visibility: Visibility,
    pub active_step: Step,
    /// Always `price(size, frame)`; written only by the store.
    pub price: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        let size = PosterSize::default();
        let frame = Frame::default();
        Self {
            location: Location::default(),
            theme: Theme::default(),
            background: Background::default(),
            shape: crate::catalog::DEFAULT_SHAPE_ID.to_string(),
            orientation: Orientation::default(),
            style: StyleId::default(),
            units: Units::default(),
            size,
            frame,
            text: TextFields::default(),
            visibility: Visibility::default(),
            active_step: Step::default(),
            price: crate::pricing::price(size, frame),
        }
    }
}

impl Configuration {
    /// (width, height) in centimetres after orientation.
    pub fn dimensions_cm(&self) -> (u32, u32) {
        self.size.oriented(self.orientation)
    }

    /// Height divided by width of the finished poster.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.dimensions_cm();
        f64::from(h) / f64::from(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Configuration::default();
        assert_eq!(config.text.title, "PARIS");
        assert_eq!(config.size, PosterSize::new(30, 40));
        assert_eq!(config.frame, Frame::None);
        assert_eq!(config.price, 3490);
        assert_eq!(config.shape, "circle");
        assert_eq!(config.style, StyleId::Classic);
        assert_eq!(config.location.zoom, 11.0);
        assert_eq!(config.active_step, Step::Background);
    }

    #[test]
    fn test_unknown_ids_fall_back() {
        assert_eq!(Theme::from_id("ultraviolet"), Theme::White);
        assert_eq!(Frame::from_id("gold"), Frame::None);
        assert_eq!(Background::from_id("granite"), Background::White);
        assert_eq!(Orientation::from_id("diagonal"), Orientation::Portrait);
        assert_eq!(Step::from_id("checkout"), Step::Background);
        assert_eq!(Theme::from_id("BLUE"), Theme::Blue);
    }

    #[test]
    fn test_unknown_ids_fall_back_when_deserializing() {
        let json = r#"{"theme":"neon","frame":"gilded","background":"stone"}"#;
        let config: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme, Theme::White);
        assert_eq!(config.frame, Frame::None);
        assert_eq!(config.background, Background::White);
        // Missing fields take their defaults
        assert_eq!(config.text.title, "PARIS");
    }

    #[test]
    fn test_poster_size_parse() {
        assert_eq!(PosterSize::parse("50x70"), Some(PosterSize::new(50, 70)));
        assert_eq!(PosterSize::parse(" 21 × 30 "), Some(PosterSize::new(21, 30)));
        assert_eq!(PosterSize::parse("0x30"), None);
        assert_eq!(PosterSize::parse("big"), None);
        assert_eq!(PosterSize::parse("100000000x1"), None);
        assert_eq!(PosterSize::parse("1000x1000"), Some(PosterSize::new(1000, 1000)));
    }

    #[test]
    fn test_orientation_swaps_edges() {
        let size = PosterSize::new(30, 40);
        assert_eq!(size.oriented(Orientation::Portrait), (30, 40));
        assert_eq!(size.oriented(Orientation::Landscape), (40, 30));
        assert_eq!(PosterSize::new(40, 30).oriented(Orientation::Portrait), (30, 40));
    }

    #[test]
    fn test_clamp_zoom() {
        assert_eq!(Location::clamp_zoom(20.0), 16.0);
        assert_eq!(Location::clamp_zoom(-5.0), 1.0);
        assert_eq!(Location::clamp_zoom(f64::NAN), DEFAULT_ZOOM);
        assert_eq!(Location::clamp_zoom(f64::INFINITY), 16.0);
    }
}
