//! Settings storage implementations
//!
//! `JsonSettingsStore` keeps a flat JSON object on disk and replaces the file
//! atomically on every write (temp file in the same directory, then rename), so
//! a crash mid-write never leaves a truncated settings file behind.

use crate::error::{Result, SetlistError};
use crate::traits::SettingsStore;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;

/// File-backed settings store
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonSettingsStore {
    /// Create a store backed by `path`; the file is created lazily on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Map<String, Value> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return Map::new();
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "Ignoring unreadable settings file");
                Map::new()
            }
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let serialized = serde_json::to_string_pretty(map)?;

        let mut file = NamedTempFile::new_in(&dir)?;
        file.write_all(serialized.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path)
            .map_err(|e| SetlistError::storage(format!("Failed to replace settings file: {}", e)))?;

        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        match self.read_map().remove(key)? {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut map = self.read_map();
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }
}

/// In-memory settings store
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettingsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySettingsStore::new();
        assert!(store.load("volume").is_none());

        store.save("volume", "35").unwrap();
        assert_eq!(store.load("volume").as_deref(), Some("35"));
    }
}
