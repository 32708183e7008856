//! Configuration manager for loading and saving application configuration
//!
//! Configuration lives at `<config_dir>/droidpin/config.json`. Saves are
//! atomic (temp file + persist) to prevent corruption.

use crate::config::models::AppConfig;
use crate::error::{DroidpinError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the path to the configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("droidpin")
            .join("config.json")
    }

    /// Load configuration from the default location
    ///
    /// A missing or corrupt file yields default configuration.
    pub fn load() -> AppConfig {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> AppConfig {
        if !path.exists() {
            info!("configuration file not found, using defaults");
            return AppConfig::default();
        }

        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to read configuration, using defaults: {e}");
                return AppConfig::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to parse configuration, using defaults: {e}");
                AppConfig::default()
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(config: &AppConfig) -> Result<()> {
        Self::save_to(config, &Self::config_path())
    }

    /// Save configuration to an explicit path with an atomic write
    pub fn save_to(config: &AppConfig, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| DroidpinError::Config("invalid config path".to_string()))?;
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| DroidpinError::Config(e.to_string()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(path).map_err(|e| DroidpinError::Io(e.error))?;

        info!("configuration saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::ToolPaths;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = AppConfig {
            tools: ToolPaths {
                adb: PathBuf::from("/custom/adb"),
                scrcpy: PathBuf::from("scrcpy"),
            },
            ..AppConfig::default()
        };
        ConfigManager::save_to(&config, &path).unwrap();

        let loaded = ConfigManager::load_from(&path);
        assert_eq!(loaded.tools.adb, PathBuf::from("/custom/adb"));
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ConfigManager::load_from(&dir.path().join("nope.json"));
        assert_eq!(loaded.tools.adb, PathBuf::from("adb"));
    }

    #[test]
    fn test_load_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let loaded = ConfigManager::load_from(&path);
        assert!(loaded.preferences.audio_default);
    }
}
