//! # Persistence Adapter
//!
//! Mirrors the store into a [`BlobBackend`] under one fixed key. The stored
//! format is a JSON array of `{"text": "..."}` objects.
//!
//! - [`Persistence::load`] pulls a saved snapshot into the store through
//!   [`Store::replace_all`]. A missing blob, an unreadable blob, or malformed JSON
//!   leaves the store untouched. None of these are errors for the caller.
//! - [`Persistence::save`] writes the full current snapshot, never a diff.
//! - As a [`Subscriber`], the adapter saves after every store mutation.

use crate::backend::BlobBackend;
use crate::error::{Result, TodozError};
use crate::model::{Entry, EntryRecord};
use crate::notifier::Subscriber;
use crate::store::Store;
use tracing::{info, warn};

/// Default key the entry list is stored under.
pub const STORAGE_KEY: &str = "todoz-entries";

pub struct Persistence<B: BlobBackend> {
    backend: B,
    key: String,
}

impl<B: BlobBackend> Persistence<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the saved snapshot into `store`. Returns whether anything was loaded.
    pub fn load(&self, store: &Store) -> bool {
        let raw = match self.backend.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read saved entries");
                return false;
            }
        };

        let records: Vec<EntryRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring malformed saved entries");
                return false;
            }
        };

        info!(key = %self.key, count = records.len(), "loaded saved entries");
        store.replace_all(records);
        true
    }

    pub fn save(&self, entries: &[Entry]) -> Result<()> {
        let records: Vec<EntryRecord> = entries.iter().map(EntryRecord::from).collect();
        let content = serde_json::to_string_pretty(&records).map_err(TodozError::Serialization)?;
        self.backend.write(&self.key, &content)
    }
}

impl<B: BlobBackend> Subscriber for Persistence<B> {
    fn on_change(&self, entries: &[Entry]) -> Result<()> {
        self.save(entries)
    }
}
