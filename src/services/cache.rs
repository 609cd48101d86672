//! Small persistent key-value cache.
//!
//! Stores "has shown X" flags, password-reminder state, and survey dedup
//! markers as JSON values. [`FileCache`] persists to a single JSON file
//! guarded by an exclusive lock; [`MemoryCache`] backs tests and ephemeral
//! sessions.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors from cache access.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read cache file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write cache file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse cache file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode cache entry '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode cache entry '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw JSON key-value storage.
pub trait PreferenceCache: Send + Sync {
    fn fetch_raw(&self, key: &str) -> Result<Option<Value>, CacheError>;

    fn save_raw(&self, key: &str, value: Value) -> Result<(), CacheError>;

    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// Typed access over any [`PreferenceCache`].
pub trait PreferenceCacheExt: PreferenceCache {
    fn fetch<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.fetch_raw(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| CacheError::Decode {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let value = serde_json::to_value(value).map_err(|source| CacheError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.save_raw(key, value)
    }
}

impl<C: PreferenceCache + ?Sized> PreferenceCacheExt for C {}

/// Ephemeral in-memory cache.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceCache for MemoryCache {
    fn fetch_raw(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn save_raw(&self, key: &str, value: Value) -> Result<(), CacheError> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// JSON-file-backed cache.
///
/// The whole table is held in memory; every mutation rewrites the file
/// under an exclusive lock so concurrent processes cannot interleave
/// partial writes.
pub struct FileCache {
    path: PathBuf,
    entries: Mutex<HashMap<String, Value>>,
}

impl FileCache {
    /// Default location: `<data dir>/nimbus/preferences.json`.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("nimbus").join("preferences.json")
    }

    /// Open the cache at `path`, starting empty when the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| CacheError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| CacheError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, Value>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| CacheError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let write_err = |source| CacheError::Write {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(write_err)?;
        file.lock_exclusive().map_err(write_err)?;
        let content =
            serde_json::to_string_pretty(entries).map_err(|source| CacheError::Encode {
                key: "<table>".to_string(),
                source,
            })?;
        let result = file.write_all(content.as_bytes()).map_err(write_err);
        let _ = FileExt::unlock(&file);
        result
    }
}

impl PreferenceCache for FileCache {
    fn fetch_raw(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn save_raw(&self, key: &str, value: Value) -> Result<(), CacheError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value);
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
