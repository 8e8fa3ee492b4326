//! File-backed key/value persistence.
//!
//! Each key is one JSON document in the store directory. Writes are
//! synchronous and last-writer-wins; there is no locking between
//! processes sharing a directory.

mod saved;
mod selection;

use std::fs;
use std::path::{Path, PathBuf};

use btools_core::AppConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use saved::{SavedSearch, DEFAULT_MAX_SAVED, SAVED_SEARCHES_KEY};
pub use selection::SELECTION_KEY;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to deserialize {key}: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("saved search not found: {0}")]
    NotFound(String),
    #[error("validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
    max_saved: usize,
}

impl Store {
    /// Opens (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            max_saved: DEFAULT_MAX_SAVED,
        })
    }

    /// Opens the store at `BTOOLS_DATA_DIR` with the configured search cap.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        Ok(Self::open(&config.data_dir)?.with_max_saved(config.saved_searches_max))
    }

    #[must_use]
    pub fn with_max_saved(mut self, max_saved: usize) -> Self {
        self.max_saved = max_saved.max(1);
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn max_saved(&self) -> usize {
        self.max_saved
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Reads the document under `key`; `Ok(None)` when it was never written.
    fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Deserialize {
                key: key.to_string(),
                source,
            })
    }

    fn write_key<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        let path = self.path_for(key);
        fs::write(&path, body).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(key, path = %path.display(), "store document written");
        Ok(())
    }
}
