//! Configuration data models

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Paths to the external tools droidpin drives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolPaths {
    /// Path to the adb executable (bare name means "resolve via PATH")
    pub adb: PathBuf,
    /// Path to the scrcpy executable
    pub scrcpy: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            adb: PathBuf::from("adb"),
            scrcpy: PathBuf::from("scrcpy"),
        }
    }
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether new shortcuts forward device audio playback by default
    pub audio_default: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            audio_default: true,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// External tool locations
    #[serde(default)]
    pub tools: ToolPaths,
    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
    /// Directory holding generated icons and the silent launcher script.
    /// `None` means the platform data directory is used.
    #[serde(default)]
    pub resources_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Directory holding generated icons and the silent launcher script
    pub fn resources_dir(&self) -> PathBuf {
        self.resources_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("droidpin")
        })
    }

    /// Directory where generated `.png`/`.ico` icons are kept for reuse
    pub fn icons_dir(&self) -> PathBuf {
        self.resources_dir().join("icons")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool_paths_are_bare_names() {
        let config = AppConfig::default();
        assert_eq!(config.tools.adb, PathBuf::from("adb"));
        assert_eq!(config.tools.scrcpy, PathBuf::from("scrcpy"));
    }

    #[test]
    fn test_icons_dir_nests_under_resources() {
        let config = AppConfig {
            resources_dir: Some(PathBuf::from("/tmp/droidpin-res")),
            ..AppConfig::default()
        };
        assert_eq!(config.icons_dir(), PathBuf::from("/tmp/droidpin-res/icons"));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = AppConfig {
            tools: ToolPaths {
                adb: PathBuf::from("/opt/platform-tools/adb"),
                scrcpy: PathBuf::from("/opt/scrcpy/scrcpy"),
            },
            preferences: Preferences {
                audio_default: false,
            },
            resources_dir: Some(PathBuf::from("/tmp/res")),
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let loaded: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.tools.adb, config.tools.adb);
        assert_eq!(loaded.tools.scrcpy, config.tools.scrcpy);
        assert!(!loaded.preferences.audio_default);
        assert_eq!(loaded.resources_dir, config.resources_dir);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let loaded: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded.tools.adb, PathBuf::from("adb"));
        assert!(loaded.preferences.audio_default);
        assert!(loaded.resources_dir.is_none());
    }
}
