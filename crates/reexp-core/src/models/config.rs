//! Configuration structures for the reexp tools.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReexpConfig {
    /// Record store configuration.
    pub store: StoreConfig,

    /// Lookup flow configuration.
    pub lookup: LookupConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Record store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON store file. `None` uses the platform data directory.
    pub path: Option<PathBuf>,
}

/// Lookup flow configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Orders ending within this many days are flagged as expiring soon.
    pub expiring_soon_days: i64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: 7,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

impl ReexpConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ReexpConfig = serde_json::from_str(r#"{"lookup": {}}"#).unwrap();
        assert_eq!(config.lookup.expiring_soon_days, 7);
        assert!(config.output.pretty_json);
        assert!(config.store.path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ReexpConfig::default();
        config.lookup.expiring_soon_days = 14;
        config.store.path = Some(PathBuf::from("/tmp/records.json"));
        config.save(&path).unwrap();

        let loaded = ReexpConfig::from_file(&path).unwrap();
        assert_eq!(loaded.lookup.expiring_soon_days, 14);
        assert_eq!(loaded.store.path, Some(PathBuf::from("/tmp/records.json")));
    }
}
