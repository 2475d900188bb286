//! Cart hand-off.
//!
//! Adding a poster to the cart produces a `CartLine` carrying the price, the
//! variant description and a JPEG thumbnail as a data URL. Where the line goes
//! is up to the `CartSink`.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};
use crate::types::Configuration;

/// One poster in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub artifact_id: String,
    pub display_name: String,
    pub price: u32,
    /// `data:image/jpeg;base64,…`
    pub thumbnail: String,
    pub variant_label: String,
    /// The customer asked for the poster without any text.
    #[serde(default)]
    pub text_removed: bool,
}

impl CartLine {
    pub fn new(config: &Configuration, thumbnail: String, now: DateTime<Utc>) -> Self {
        Self {
            artifact_id: artifact_id(now),
            display_name: display_name(&config.text.title),
            price: config.price,
            thumbnail,
            variant_label: variant_label(config),
            text_removed: config.visibility.remove_text,
        }
    }
}

/// `poster_<unix millis>`
pub fn artifact_id(now: DateTime<Utc>) -> String {
    format!("poster_{}", now.timestamp_millis())
}

/// `Personal map "<title>"`, or `Untitled` for a blank title.
pub fn display_name(title: &str) -> String {
    let title = title.trim();
    let title = if title.is_empty() { "Untitled" } else { title };
    format!("Personal map \"{}\"", title)
}

/// `<w>×<h> cm, <frame>` with the size as stored, whatever the orientation.
pub fn variant_label(config: &Configuration) -> String {
    format!("{} cm, {}", config.size, config.frame.label())
}

/// Receives cart lines.
pub trait CartSink {
    fn add(&mut self, line: CartLine) -> Result<()>;
}

/// Keeps lines in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryCart {
    pub lines: Vec<CartLine>,
}

impl CartSink for MemoryCart {
    fn add(&mut self, line: CartLine) -> Result<()> {
        self.lines.push(line);
        Ok(())
    }
}

/// Appends one JSON document per line to a file.
#[derive(Debug, Clone)]
pub struct JsonLinesCart {
    path: PathBuf,
}

impl JsonLinesCart {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartSink for JsonLinesCart {
    fn add(&mut self, line: CartLine) -> Result<()> {
        let io_err = |e: std::io::Error| PosterError::Io {
            path: self.path.clone(),
            message: format!("Failed to append cart line: {}", e),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string(&line).map_err(|e| PosterError::Storage {
            message: format!("Failed to serialize cart line: {}", e),
        })?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        writeln!(file, "{}", json).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Frame, Orientation, PosterSize};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_line_from_defaults() {
        let config = Configuration::default();
        let line = CartLine::new(&config, "data:image/jpeg;base64,AA".into(), at(1_700_000_000_123));
        assert_eq!(
            line,
            CartLine {
                artifact_id: "poster_1700000000123".into(),
                display_name: "Personal map \"PARIS\"".into(),
                price: 3490,
                thumbnail: "data:image/jpeg;base64,AA".into(),
                variant_label: "30×40 cm, no frame".into(),
                text_removed: false,
            }
        );
    }

    #[test]
    fn test_variant_label_keeps_stored_size_when_landscape() {
        let mut config = Configuration::default();
        config.size = PosterSize::new(50, 70);
        config.orientation = Orientation::Landscape;
        config.frame = Frame::Hanger;
        assert_eq!(variant_label(&config), "50×70 cm, Hanger");
    }

    #[test]
    fn test_blank_title_is_untitled() {
        assert_eq!(display_name("  "), "Personal map \"Untitled\"");
    }

    #[test]
    fn test_json_lines_cart_appends() {
        let dir = tempdir().unwrap();
        let mut cart = JsonLinesCart::new(dir.path().join("cart.jsonl"));
        let line = CartLine::new(&Configuration::default(), String::new(), at(1));
        cart.add(line.clone()).unwrap();
        cart.add(line).unwrap();

        let content = std::fs::read_to_string(cart.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        let parsed: CartLine = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(parsed.artifact_id, "poster_1");
    }
}
