use btools_core::FilterCriteria;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Store, StoreError};

/// Key holding the saved-search list, newest first.
pub const SAVED_SEARCHES_KEY: &str = "savedSearches.v1";

pub const DEFAULT_MAX_SAVED: usize = 100;

/// A named snapshot of filter criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub name: String,
    pub criteria: FilterCriteria,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// All saved searches, newest first. Unreadable content reads as empty.
    #[must_use]
    pub fn list_searches(&self) -> Vec<SavedSearch> {
        match self.read_key::<Vec<SavedSearch>>(SAVED_SEARCHES_KEY) {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable saved searches, treating as empty");
                Vec::new()
            }
        }
    }

    /// Saves `criteria` under `name`.
    ///
    /// An existing entry with the same name is replaced in place and keeps
    /// its `created_at`. A new entry goes to the front of the list and the
    /// oldest entries beyond the cap are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for a blank name, or an I/O or
    /// serialization error if the list cannot be written.
    pub fn save_search(
        &self,
        name: &str,
        criteria: &FilterCriteria,
    ) -> Result<SavedSearch, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(
                "saved search name must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let mut items = self.list_searches();
        let existing = items.iter().position(|s| s.name == name);

        let entry = SavedSearch {
            name: name.to_string(),
            criteria: criteria.normalized(),
            created_at: existing.map_or(now, |i| items[i].created_at),
            updated_at: now,
        };

        match existing {
            Some(i) => items[i] = entry.clone(),
            None => {
                items.insert(0, entry.clone());
                if items.len() > self.max_saved {
                    let evicted = items.len() - self.max_saved;
                    items.truncate(self.max_saved);
                    tracing::info!(evicted, "saved searches over cap, oldest dropped");
                }
            }
        }

        self.write_key(SAVED_SEARCHES_KEY, &items)?;
        tracing::info!(name, updated = existing.is_some(), "saved search stored");
        Ok(entry)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no search has that name.
    pub fn load_search(&self, name: &str) -> Result<SavedSearch, StoreError> {
        self.list_searches()
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no search has that name, or an
    /// I/O error if the list cannot be written.
    pub fn delete_search(&self, name: &str) -> Result<(), StoreError> {
        let mut items = self.list_searches();
        let before = items.len();
        items.retain(|s| s.name != name);
        if items.len() == before {
            return Err(StoreError::NotFound(name.to_string()));
        }
        self.write_key(SAVED_SEARCHES_KEY, &items)?;
        tracing::info!(name, "saved search deleted");
        Ok(())
    }
}
