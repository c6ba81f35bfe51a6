use serde::{Deserialize, Serialize};
use std::fmt;

/// One todo item.
///
/// Equality and hashing go through `text` only, so two separately built entries
/// with the same text are the same entry as far as the [`Store`](crate::store::Store)
/// is concerned. The text is fixed at construction.
///
/// No validation happens here: callers trim and reject empty input before building
/// an entry (see [`TodozApi::submit`](crate::api::TodozApi::submit)).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    text: String,
}

impl Entry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Entry {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Persisted shape of an entry: `{"text": "..."}`.
///
/// Unknown fields in stored JSON are ignored on read, and converting a record
/// into an [`Entry`] keeps nothing but the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub text: String,
}

impl From<EntryRecord> for Entry {
    fn from(record: EntryRecord) -> Self {
        Self::new(record.text)
    }
}

impl From<&Entry> for EntryRecord {
    fn from(entry: &Entry) -> Self {
        Self {
            text: entry.text.clone(),
        }
    }
}
