//! Persisted selection store: a key -> JSON-string map read and written
//! wholesale. The core only ever talks to the [`SelectionStore`] trait, so
//! tests run against the in-memory fake and deployments use the file-backed
//! implementation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

pub const KITCHEN_INGREDIENTS_KEY: &str = "kitchen-ingredients";
pub const KITCHEN_COOKWARE_KEY: &str = "kitchen-cookware";
pub const COOKBOOK_KEY: &str = "porkchop_cookbook";
pub const RECIPE_OF_WEEK_KEY: &str = "porkchop_recipe_of_week";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read key '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("value for key '{key}' is not valid JSON: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait SelectionStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        Self: Sized,
    {
        match self.load_raw(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Decode {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.save_raw(key, &raw)
    }
}

impl<S: SelectionStore> SelectionStore for &S {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load_raw(key)
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save_raw(key, value)
    }
}

/// In-memory store for tests and ephemeral sessions. `read_only` builds a
/// fake whose writes fail, for exercising write-failure handling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn read_only() -> Self {
        MemoryStore {
            entries: Mutex::new(HashMap::new()),
            read_only: true,
        }
    }
}

impl SelectionStore for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Read {
            key: key.to_string(),
            source: std::io::Error::other("store lock poisoned"),
        })?;
        Ok(entries.get(key).cloned())
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Write {
                key: key.to_string(),
                source: std::io::Error::other("store is read-only"),
            });
        }
        let mut entries = self.entries.lock().map_err(|_| StoreError::Write {
            key: key.to_string(),
            source: std::io::Error::other("store lock poisoned"),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key under a base directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        JsonFileStore {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl SelectionStore for JsonFileStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })?;
        std::fs::write(self.path_for(key), value).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load_raw("missing").unwrap().is_none());

        store.save_json(KITCHEN_INGREDIENTS_KEY, &vec!["egg", "milk"]).unwrap();
        let loaded: Vec<String> = store.load_json(KITCHEN_INGREDIENTS_KEY).unwrap().unwrap();
        assert_eq!(loaded, vec!["egg", "milk"]);
    }

    #[test]
    fn read_only_store_surfaces_write_failure() {
        let store = MemoryStore::read_only();
        let err = store.save_raw("k", "v").unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[test]
    fn decode_error_names_the_key() {
        let store = MemoryStore::new();
        store.save_raw("bad", "not json").unwrap();
        let err = store.load_json::<Vec<String>>("bad").unwrap_err();
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(store.load_raw(COOKBOOK_KEY).unwrap().is_none());
        store.save_json(COOKBOOK_KEY, &42u32).unwrap();
        assert_eq!(store.load_json::<u32>(COOKBOOK_KEY).unwrap(), Some(42));
    }

    #[test]
    fn file_store_surfaces_write_error() {
        // The base path is an existing file, so the store directory can
        // never be created and the save must fail with a typed error.
        let file = tempfile::NamedTempFile::new().unwrap();
        let store = JsonFileStore::new(file.path());

        let err = store.save_json(COOKBOOK_KEY, &vec!["carbonara"]).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(err.to_string().contains(COOKBOOK_KEY));
    }

    #[test]
    fn file_store_sanitizes_keys() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save_raw("../escape/attempt", "{}").unwrap();
        // The value is reachable under the same key and stayed in the dir.
        assert_eq!(store.load_raw("../escape/attempt").unwrap().as_deref(), Some("{}"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
