//! # Configuration
//!
//! Stored as `config.json` in the data directory. A missing file means
//! defaults; missing fields take their defaults too.
//!
//! | Key           | Default         | Description                              |
//! |---------------|-----------------|------------------------------------------|
//! | `storage_key` | `todoz-entries` | Blob key the entry list is persisted under |
//! | `color`       | `true`          | Colour the list view                     |

use crate::backend::validate_key;
use crate::error::{Result, TodozError};
use crate::persistence::STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodozConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

fn default_color() -> bool {
    true
}

impl Default for TodozConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            color: default_color(),
        }
    }
}

impl TodozConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TodozError::Io)?;
        let config: TodozConfig =
            serde_json::from_str(&content).map_err(TodozError::Serialization)?;
        validate_key(&config.storage_key)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TodozError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TodozError::Serialization)?;
        fs::write(config_path, content).map_err(TodozError::Io)?;
        Ok(())
    }

    /// Sets a value by its user-facing key (`storage-key` or `color`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "storage-key" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(TodozError::Config("storage-key cannot be empty".into()));
                }
                validate_key(value)?;
                self.storage_key = value.to_string();
            }
            "color" => {
                self.color = match value {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    other => {
                        return Err(TodozError::Config(format!(
                            "Invalid value for color: {}",
                            other
                        )));
                    }
                };
            }
            other => return Err(TodozError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    /// Reads a value by its user-facing key.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "storage-key" => Ok(self.storage_key.clone()),
            "color" => Ok(self.color.to_string()),
            other => Err(TodozError::Config(format!("Unknown config key: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TodozConfig::default();
        assert_eq!(config.storage_key, "todoz-entries");
        assert!(config.color);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = TodozConfig::load(temp.path().join("absent")).unwrap();
        assert_eq!(config, TodozConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("data");

        let mut config = TodozConfig::default();
        config.set("storage-key", "groceries").unwrap();
        config.set("color", "off").unwrap();
        config.save(&dir).unwrap();

        let loaded = TodozConfig::load(&dir).unwrap();
        assert_eq!(loaded.storage_key, "groceries");
        assert!(!loaded.color);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"color": false}"#).unwrap();

        let loaded = TodozConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.storage_key, STORAGE_KEY);
        assert!(!loaded.color);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "{nope").unwrap();

        assert!(matches!(
            TodozConfig::load(temp.path()),
            Err(TodozError::Serialization(_))
        ));
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_values() {
        let mut config = TodozConfig::default();
        assert!(matches!(config.set("editor", "vim"), Err(TodozError::Config(_))));
        assert!(matches!(config.set("color", "maybe"), Err(TodozError::Config(_))));
        assert!(matches!(config.set("storage-key", "  "), Err(TodozError::Config(_))));
        assert_eq!(config, TodozConfig::default());
    }

    #[test]
    fn test_set_rejects_storage_key_the_backend_cannot_hold() {
        let mut config = TodozConfig::default();
        for key in ["lists/groceries", "a\\b", ".hidden", "../up"] {
            match config.set("storage-key", key) {
                Err(TodozError::Config(msg)) => assert!(msg.contains("Invalid storage key")),
                other => panic!("Expected Config error for {:?}, got {:?}", key, other),
            }
        }
        assert_eq!(config.storage_key, STORAGE_KEY);
    }

    #[test]
    fn test_load_rejects_hand_edited_bad_storage_key() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"{"storage_key": "lists/groceries"}"#,
        )
        .unwrap();

        assert!(matches!(
            TodozConfig::load(temp.path()),
            Err(TodozError::Config(_))
        ));
    }

    #[test]
    fn test_get() {
        let config = TodozConfig::default();
        assert_eq!(config.get("storage-key").unwrap(), "todoz-entries");
        assert_eq!(config.get("color").unwrap(), "true");
        assert!(config.get("nope").is_err());
    }
}
