use super::BlobBackend;
use crate::error::{Result, TodozError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory blob backend for testing.
#[derive(Default)]
pub struct MemBackend {
    blobs: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl BlobBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(TodozError::Store("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::EntryRecord;

    /// Builds a `MemBackend` pre-seeded with blobs.
    pub struct BackendFixture {
        pub backend: MemBackend,
    }

    impl Default for BackendFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BackendFixture {
        pub fn new() -> Self {
            Self {
                backend: MemBackend::new(),
            }
        }

        /// Stores `texts` under `key` in the persisted `[{"text": ..}]` shape.
        pub fn with_entries(self, key: &str, texts: &[&str]) -> Self {
            let records: Vec<EntryRecord> = texts
                .iter()
                .map(|t| EntryRecord {
                    text: t.to_string(),
                })
                .collect();
            let json = serde_json::to_string(&records).unwrap();
            self.backend.write(key, &json).unwrap();
            self
        }

        /// Stores an arbitrary string under `key`, valid JSON or not.
        pub fn with_raw(self, key: &str, raw: &str) -> Self {
            self.backend.write(key, raw).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::BackendFixture;
    use super::*;

    #[test]
    fn test_read_missing_is_none() {
        let backend = MemBackend::new();
        assert_eq!(backend.read("nope").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let backend = MemBackend::new();
        backend.write("k", "v1").unwrap();
        backend.write("k", "v2").unwrap();
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_simulated_write_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        match backend.write("k", "v") {
            Err(TodozError::Store(msg)) => assert!(msg.contains("Simulated")),
            other => panic!("Expected Store error, got {:?}", other),
        }
        assert_eq!(backend.read("k").unwrap(), None);
    }

    #[test]
    fn test_fixture_with_entries() {
        let fixture = BackendFixture::default().with_entries("todos", &["a", "b"]);
        let raw = fixture.backend.read("todos").unwrap().unwrap();
        assert_eq!(raw, r#"[{"text":"a"},{"text":"b"}]"#);
    }
}
