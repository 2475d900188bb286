//! Configuration store.
//!
//! `ConfigStore` owns the single live `Configuration` of an editing session.
//! All mutation goes through its setters; each setter applies its change,
//! recomputes the price when size or frame changed, and writes the whole
//! record through to storage before returning.

mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage};

use tracing::{debug, warn};

use crate::location::SearchResult;
use crate::pricing;
use crate::style::StyleId;
use crate::types::{
    Background, Configuration, Frame, Location, Orientation, PosterSize, Step, TextUpdate, Theme,
    Units, DEFAULT_ZOOM,
};

/// Fixed namespace of the persisted session slot.
pub const STORAGE_KEY: &str = "mol_constructor_v1";

/// Zoom applied when a search result is selected.
const SEARCH_RESULT_ZOOM: f64 = 11.0;

/// Owner of the session configuration.
#[derive(Debug)]
pub struct ConfigStore<S: Storage> {
    config: Configuration,
    storage: S,
}

impl<S: Storage> ConfigStore<S> {
    /// Load the session from `storage`, or start from defaults when the slot
    /// is absent or unreadable.
    pub fn open(storage: S) -> Self {
        let config = match storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Configuration>(&raw) {
                Ok(config) => normalise(config),
                Err(e) => {
                    warn!(error = %e, "stored configuration is corrupt, using defaults");
                    Configuration::default()
                }
            },
            Ok(None) => Configuration::default(),
            Err(e) => {
                warn!(error = %e, "stored configuration is unreadable, using defaults");
                Configuration::default()
            }
        };

        Self { config, storage }
    }

    /// The current configuration.
    pub fn snapshot(&self) -> &Configuration {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Move the map centre. Non-finite coordinates are ignored.
    pub fn set_coords(&mut self, lat: f64, lng: f64) {
        if !lat.is_finite() || !lng.is_finite() {
            warn!(lat, lng, "ignoring non-finite coordinates");
            return;
        }
        self.config.location.lat = lat.clamp(-90.0, 90.0);
        self.config.location.lng = lng.clamp(-180.0, 180.0);
        self.commit();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.config.location.zoom = Location::clamp_zoom(zoom);
        self.commit();
    }

    /// Set centre and zoom together.
    pub fn set_location(&mut self, lat: f64, lng: f64, zoom: f64) {
        if lat.is_finite() && lng.is_finite() {
            self.config.location.lat = lat.clamp(-90.0, 90.0);
            self.config.location.lng = lng.clamp(-180.0, 180.0);
        } else {
            warn!(lat, lng, "ignoring non-finite coordinates");
        }
        self.config.location.zoom = Location::clamp_zoom(zoom);
        self.commit();
    }

    /// Apply a location search result: centre, zoom and the derived captions.
    pub fn select_location(&mut self, result: &SearchResult) {
        let [lng, lat] = result.center;
        self.set_location(lat, lng, SEARCH_RESULT_ZOOM);

        let title = result
            .display_name
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown Location")
            .to_uppercase();
        let loc = self.config.location;
        self.set_text(TextUpdate {
            title: Some(title),
            subtitle: Some(format_coords(loc.lat, loc.lng)),
            ..TextUpdate::default()
        });
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
        self.commit();
    }

    pub fn set_style(&mut self, style: StyleId) {
        self.config.style = style;
        self.commit();
    }

    pub fn set_background(&mut self, background: Background) {
        self.config.background = background;
        self.commit();
    }

    /// Select a shape by catalog id. Unknown ids are kept as-is; they render
    /// with the fallback mask.
    pub fn set_shape(&mut self, shape: impl Into<String>) {
        self.config.shape = shape.into();
        self.commit();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.config.orientation = orientation;
        self.commit();
    }

    pub fn set_units(&mut self, units: Units) {
        self.config.units = units;
        self.recalc_price();
        self.commit();
    }

    pub fn set_size(&mut self, size: PosterSize) {
        if !size.is_valid() {
            warn!(%size, "ignoring out-of-range poster size");
            return;
        }
        self.config.size = size;
        self.recalc_price();
        self.commit();
    }

    pub fn set_frame(&mut self, frame: Frame) {
        self.config.frame = frame;
        self.recalc_price();
        self.commit();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.config.text.date = date.into();
        self.commit();
    }

    /// Replace any subset of the text fields.
    pub fn set_text(&mut self, update: TextUpdate) {
        let text = &mut self.config.text;
        if let Some(title) = update.title {
            text.title = title;
        }
        if let Some(divider) = update.divider {
            text.divider = divider;
        }
        if let Some(subtitle) = update.subtitle {
            text.subtitle = subtitle;
        }
        if let Some(date) = update.date {
            text.date = date;
        }
        self.commit();
    }

    pub fn toggle_title(&mut self) {
        self.config.visibility.show_title ^= true;
        self.commit();
    }

    pub fn toggle_name_city(&mut self) {
        self.config.visibility.show_name_city ^= true;
        self.commit();
    }

    pub fn toggle_date(&mut self) {
        self.config.visibility.show_date ^= true;
        self.commit();
    }

    pub fn toggle_coords(&mut self) {
        self.config.visibility.show_coords ^= true;
        self.commit();
    }

    pub fn toggle_hide_text(&mut self) {
        self.config.visibility.hide_text ^= true;
        self.commit();
    }

    pub fn toggle_remove_text(&mut self) {
        self.config.visibility.remove_text ^= true;
        self.commit();
    }

    pub fn set_active_step(&mut self, step: Step) {
        self.config.active_step = step;
        self.commit();
    }

    /// Restore the documented defaults.
    pub fn reset(&mut self) {
        self.config = Configuration::default();
        self.commit();
    }

    fn recalc_price(&mut self) {
        let price = pricing::price(self.config.size, self.config.frame);
        debug!(size = %self.config.size, frame = self.config.frame.id(), price, "price recomputed");
        self.config.price = price;
    }

    /// Write the configuration through to storage. Failures are logged, not
    /// raised: the in-memory record stays authoritative.
    fn commit(&mut self) {
        match serde_json::to_string(&self.config) {
            Ok(json) => {
                if let Err(e) = self.storage.write(STORAGE_KEY, &json) {
                    warn!(error = %e, "failed to persist configuration");
                } else {
                    debug!(bytes = json.len(), "configuration persisted");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize configuration"),
        }
    }
}

/// `48.8566°N / 2.3522°E`
pub fn format_coords(lat: f64, lng: f64) -> String {
    format!("{:.4}°N / {:.4}°E", lat, lng)
}

/// Repair a loaded record so it satisfies the configuration invariants.
fn normalise(mut config: Configuration) -> Configuration {
    let defaults = Location::default();
    if !config.location.lat.is_finite() || !config.location.lng.is_finite() {
        config.location.lat = defaults.lat;
        config.location.lng = defaults.lng;
    }
    config.location.zoom = if config.location.zoom.is_finite() {
        Location::clamp_zoom(config.location.zoom)
    } else {
        DEFAULT_ZOOM
    };
    if !config.size.is_valid() {
        config.size = pricing::DEFAULT_SIZE;
    }
    config.price = pricing::price(config.size, config.frame);
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> ConfigStore<MemoryStorage> {
        ConfigStore::open(MemoryStorage::new())
    }

    #[test]
    fn test_opens_with_defaults() {
        let store = store();
        assert_eq!(store.snapshot(), &Configuration::default());
        assert_eq!(store.snapshot().price, 3490);
    }

    #[test]
    fn test_price_scenarios() {
        let mut store = store();
        store.set_frame(Frame::Frame);
        assert_eq!(store.snapshot().price, 4390);

        store.set_size(PosterSize::new(50, 70));
        store.set_frame(Frame::Hanger);
        assert_eq!(store.snapshot().price, 5990);
    }

    #[test]
    fn test_price_recomputed_after_every_setter() {
        let mut store = store();
        for (size, _) in pricing::SIZE_PRICES {
            for frame in Frame::ALL {
                store.set_size(size);
                store.set_frame(frame);
                assert_eq!(store.snapshot().price, pricing::price(size, frame));
                store.set_frame(Frame::None);
                assert_eq!(store.snapshot().price, pricing::base_price(size));
            }
        }
    }

    #[test]
    fn test_zoom_clamps() {
        let mut store = store();
        store.set_zoom(20.0);
        assert_eq!(store.snapshot().location.zoom, 16.0);
        store.set_zoom(-5.0);
        assert_eq!(store.snapshot().location.zoom, 1.0);
    }

    #[test]
    fn test_non_finite_coords_ignored() {
        let mut store = store();
        store.set_coords(f64::NAN, 10.0);
        assert_eq!(store.snapshot().location, Location::default());
        store.set_coords(51.5, -0.12);
        assert_eq!(store.snapshot().location.lat, 51.5);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let mut store = store();
        store.set_theme(Theme::Blue);
        store.toggle_title();
        store.set_active_step(Step::Size);
        assert_eq!(store.storage().writes(), 3);

        let persisted: Configuration =
            serde_json::from_str(store.storage().get(STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(&persisted, store.snapshot());
    }

    #[test]
    fn test_setting_current_value_is_harmless() {
        let mut store = store();
        let before = store.snapshot().clone();
        store.set_frame(Frame::None);
        store.set_size(PosterSize::new(30, 40));
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut store = store();
        store.toggle_title();
        let v = store.snapshot().visibility;
        assert!(!v.show_title);
        assert!(v.show_name_city && v.show_date && v.show_coords);
    }

    #[test]
    fn test_reopen_restores_session() {
        let mut store = store();
        store.set_size(PosterSize::new(40, 50));
        store.set_shape("heart");
        let storage = store.into_storage();

        let reopened = ConfigStore::open(storage);
        assert_eq!(reopened.snapshot().size, PosterSize::new(40, 50));
        assert_eq!(reopened.snapshot().shape, "heart");
        assert_eq!(reopened.snapshot().price, 4490);
    }

    #[test]
    fn test_corrupt_slot_falls_back_to_defaults() {
        let storage = MemoryStorage::new().with_slot(STORAGE_KEY, "{not json");
        let store = ConfigStore::open(storage);
        assert_eq!(store.snapshot(), &Configuration::default());
    }

    #[test]
    fn test_loaded_record_is_normalised() {
        let raw = r#"{"location":{"lat":1.0,"lng":2.0,"zoom":99.0},"size":{"w":50,"h":70},"price":1}"#;
        let store = ConfigStore::open(MemoryStorage::new().with_slot(STORAGE_KEY, raw));
        assert_eq!(store.snapshot().location.zoom, 16.0);
        assert_eq!(store.snapshot().price, 5490);
    }

    #[test]
    fn test_out_of_range_size_ignored() {
        let mut store = store();
        store.set_size(PosterSize::new(0, 40));
        store.set_size(PosterSize::new(100_000_000, 1));
        assert_eq!(store.snapshot().size, pricing::DEFAULT_SIZE);
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_loaded_zero_size_is_repaired() {
        let raw = r#"{"size":{"w":0,"h":70},"frame":"frame"}"#;
        let store = ConfigStore::open(MemoryStorage::new().with_slot(STORAGE_KEY, raw));
        assert_eq!(store.snapshot().size, pricing::DEFAULT_SIZE);
        assert_eq!(store.snapshot().price, 4390);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut store = store();
        store.set_frame(Frame::Hanger);
        store.set_text(TextUpdate {
            title: Some("ROMA".into()),
            ..TextUpdate::default()
        });
        store.reset();
        assert_eq!(store.snapshot(), &Configuration::default());
    }

    #[test]
    fn test_select_location_updates_captions() {
        let mut store = store();
        store.set_zoom(3.0);
        store.select_location(&SearchResult {
            id: "place.1".into(),
            display_name: "Lisbon, Portugal".into(),
            center: [-9.1393, 38.7223],
        });
        let config = store.snapshot();
        assert_eq!(config.location.zoom, 11.0);
        assert_eq!(config.text.title, "LISBON");
        assert_eq!(config.text.subtitle, "38.7223°N / -9.1393°E");
    }
}
