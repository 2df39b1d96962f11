//! Startup configuration bootstrap.
//!
//! Configuration is optional and best-effort: any failure to read or parse
//! it is logged and replaced by defaults, never propagated to the caller.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Extra directories to scan for font files (where the sticker font
    /// lives).
    pub font_dirs: Vec<PathBuf>,
    /// Default catalog path.
    pub catalog: Option<PathBuf>,
    /// Whether usage events are recorded.
    pub usage_log: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            font_dirs: Vec::new(),
            catalog: None,
            usage_log: true,
        }
    }
}

/// Load configuration from an optional JSON file.
///
/// Missing path, unreadable file, and malformed JSON all degrade to the
/// default configuration with a logged warning.
pub fn bootstrap(path: Option<&Path>) -> AppConfig {
    let Some(path) = path else {
        return AppConfig::default();
    };

    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("could not read config {}: {}", path.display(), err);
            return AppConfig::default();
        }
    };

    match serde_json::from_str(&json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("could not parse config {}: {}", path.display(), err);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.font_dirs.is_empty());
        assert!(config.catalog.is_none());
        assert!(config.usage_log);
    }

    #[test]
    fn test_bootstrap_without_path() {
        let config = bootstrap(None);
        assert!(config.usage_log);
    }

    #[test]
    fn test_bootstrap_missing_file_degrades_to_defaults() {
        let config = bootstrap(Some(Path::new("/no/such/config.json")));
        assert!(config.font_dirs.is_empty());
        assert!(config.usage_log);
    }

    #[test]
    fn test_bootstrap_parses_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"font_dirs": ["/tmp/fonts"], "usage_log": false}"#).unwrap();

        let config = bootstrap(Some(&path));
        assert_eq!(config.font_dirs, vec![PathBuf::from("/tmp/fonts")]);
        assert!(!config.usage_log);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_bootstrap_malformed_json_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{nope").unwrap();

        let config = bootstrap(Some(&path));
        assert!(config.usage_log);
    }
}
