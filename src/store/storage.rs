//! Durable key-value slots for the configuration store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PosterError, Result};

/// A namespaced key-value slot holding serialized state.
pub trait Storage {
    /// Read the value under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory storage; loses everything on drop.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot without counting it as a write.
    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of writes performed so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// One JSON file per key inside a state directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never observes a half-written slot.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path).map(Some).map_err(|e| PosterError::Io {
            path,
            message: format!("Failed to read state: {}", e),
        })
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| PosterError::Io {
            path: self.dir.clone(),
            message: format!("Failed to create state directory: {}", e),
        })?;

        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|e| PosterError::Io {
            path: tmp.clone(),
            message: format!("Failed to write state: {}", e),
        })?;

        fs::rename(&tmp, &path).map_err(|e| PosterError::Io {
            path,
            message: format!("Failed to replace state: {}", e),
        })
    }
}
