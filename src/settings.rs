//! Project settings (poster.yaml).
//!
//! Settings locate the state directory, the static assets and the output
//! directory, and tune the export pipeline. Every key is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};
use crate::export::{RetryPolicy, DEFAULT_PX_PER_CM, THUMBNAIL_WIDTH};

/// File name looked up in the working directory.
pub const SETTINGS_FILE: &str = "poster.yaml";

/// Project settings loaded from poster.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the persisted configuration.
    pub state_dir: PathBuf,

    /// Static map image.
    pub map: Option<PathBuf>,

    /// Directory of background textures named `<id>.jpg|jpeg|png`.
    pub backgrounds: Option<PathBuf>,

    /// Where downloads are written.
    pub output: PathBuf,

    /// Full-size export resolution.
    pub px_per_cm: u32,

    /// Width of cart thumbnails.
    pub thumbnail_width: u32,

    pub export: ExportSettings,
}

/// Retry tuning for the export pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            retry_delay_ms: policy.delay.as_millis() as u64,
        }
    }
}

impl ExportSettings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(".poster"),
            map: None,
            backgrounds: None,
            output: PathBuf::from("dist"),
            px_per_cm: DEFAULT_PX_PER_CM,
            thumbnail_width: THUMBNAIL_WIDTH,
            export: ExportSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a poster.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PosterError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read settings: {}", e),
        })?;

        let mut settings = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            settings.rebase(base);
        }
        Ok(settings)
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PosterError::Parse {
            message: format!("Invalid settings: {}", e),
            help: Some("Check poster.yaml syntax".to_string()),
        })
    }

    /// Load `dir/poster.yaml` if present, defaults otherwise.
    ///
    /// Relative paths resolve against `dir` either way.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if path.is_file() {
            return Self::load(&path);
        }
        let mut settings = Self::default();
        settings.rebase(dir);
        Ok(settings)
    }

    /// Resolve relative paths against the directory the file was read from.
    fn rebase(&mut self, base: &Path) {
        if base.as_os_str().is_empty() {
            return;
        }
        let join = |p: &Path| if p.is_relative() { base.join(p) } else { p.to_path_buf() };
        self.state_dir = join(&self.state_dir);
        self.output = join(&self.output);
        self.map = self.map.as_deref().map(join);
        self.backgrounds = self.backgrounds.as_deref().map(join);
    }
}
