//! # Blob Storage
//!
//! The persistence adapter only needs a flat key → string store, the same
//! contract a browser's local storage offers. [`BlobBackend`] captures that
//! contract so persistence logic never touches the filesystem directly.
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: one `<key>.json` file per key under a data directory.
//!   Writes are atomic (temp file, then rename).
//! - [`mem::MemBackend`]: a `HashMap` behind a `RefCell`, for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── config.json          # TodozConfig
//! └── todoz-entries.json   # [{"text": "..."}, ...]
//! ```

use crate::error::{Result, TodozError};

pub mod fs;
pub mod mem;

/// Raw key/value I/O. All methods take `&self`; implementations that need
/// mutation use interior mutability since todoz is single-threaded.
pub trait BlobBackend {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    /// Returns `Err` on I/O failures or a key [`validate_key`] rejects.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces whatever is stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// A key must name a single file directly inside the data directory.
/// A leading `.` is reserved for temp files.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\', '\0']) {
        return Err(TodozError::Config(format!("Invalid storage key: {:?}", key)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        for key in ["todoz-entries", "groceries", "list.v2", "my list"] {
            assert!(validate_key(key).is_ok(), "key {:?} should be accepted", key);
        }
        for key in ["", "../up", "a/b", "lists/groceries", ".hidden", "a\\b", "nul\0"] {
            assert!(
                matches!(validate_key(key), Err(TodozError::Config(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }
}
