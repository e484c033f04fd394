// SPDX-License-Identifier: MPL-2.0
//! Persisted key-value storage backends for the quote cart.
//!
//! The cart treats storage as a synchronous string-blob store keyed by a
//! single fixed key, not as a database. Backends are interchangeable; the
//! cart never depends on where the blob actually lives.

use crate::error::{Error, Result};
use crate::paths;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Synchronous get/set blob store scoped to one device.
pub trait CartStorage {
    /// Reads the blob stored under `key`. `Ok(None)` means no data present.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous blob.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed storage: each key maps to `<key>.json` in the app data
/// directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at the platform data directory (see [`paths`]).
    pub fn new() -> Result<Self> {
        paths::get_app_data_dir()
            .map(|dir| Self { dir })
            .ok_or_else(|| Error::Io("could not determine application data directory".to_string()))
    }

    /// Storage rooted at an explicit directory, for tests and `--data-dir`.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl CartStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, e.g. to simulate a blob left by a previous session.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
