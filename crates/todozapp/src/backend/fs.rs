use super::{BlobBackend, validate_key};
use crate::error::{Result, TodozError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem blob backend: `<root>/<key>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where the blob for `key` lives. Rejects keys that would escape the root.
    pub fn blob_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(TodozError::Io)?;
        }
        Ok(())
    }
}

impl BlobBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(TodozError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let target = self.blob_path(key)?;
        self.ensure_dir(&self.root)?;

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(TodozError::Io)?;
        fs::rename(&tmp, &target).map_err(TodozError::Io)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_key() {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path());
        assert_eq!(backend.read("todos").unwrap(), None);
    }

    #[test]
    fn test_write_creates_root_and_file() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("data");
        let backend = FsBackend::new(&root);

        backend.write("todos", "[]").unwrap();

        assert!(root.join("todos.json").exists());
        assert_eq!(backend.read("todos").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path());

        backend.write("todos", "one").unwrap();
        backend.write("todos", "two").unwrap();

        assert_eq!(backend.read("todos").unwrap().as_deref(), Some("two"));
        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_rejects_escaping_keys() {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path());

        for key in ["", "../up", "a/b", ".hidden", "a\\b"] {
            assert!(
                matches!(backend.write(key, "x"), Err(TodozError::Config(_))),
                "key {:?} should be rejected",
                key
            );
        }
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
