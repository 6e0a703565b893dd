//! Configuration file support for winestudy.
//!
//! This module provides serialization and deserialization of application
//! settings: log verbosity, where the map library lives, viewport limits and
//! quiz timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{quiz, zoom};
use crate::session::SessionSettings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default)]
    pub preferences: UserPreferences,

    #[serde(default)]
    pub viewport: ViewportConfig,

    #[serde(default)]
    pub quiz: QuizConfig,
}

fn default_app_name() -> String {
    "winestudy".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Map library root (holds `maps/` and `polyregions/`); empty means
    /// the current directory
    #[serde(default)]
    pub data_dir: String,
}

/// Zoom limits and step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
    /// Zoom factor per wheel notch
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
}

fn default_min_scale() -> f64 {
    zoom::MIN
}

fn default_max_scale() -> f64 {
    zoom::MAX
}

fn default_zoom_step() -> f64 {
    zoom::STEP
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            zoom_step: default_zoom_step(),
        }
    }
}

/// Quiz behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Start the next round automatically
    #[serde(default = "default_auto_restart")]
    pub auto_restart: bool,
    /// Pause before the automatic restart, in milliseconds
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
}

fn default_auto_restart() -> bool {
    true
}

fn default_restart_delay_ms() -> u64 {
    quiz::RESTART_DELAY.as_millis() as u64
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            auto_restart: default_auto_restart(),
            restart_delay_ms: default_restart_delay_ms(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            viewport: ViewportConfig::default(),
            quiz: QuizConfig::default(),
        }
    }

    /// Session tunables from this configuration.
    ///
    /// Out-of-range values fall back to defaults rather than failing.
    pub fn session_settings(&self) -> SessionSettings {
        let defaults = SessionSettings::default();
        let positive = |v: f64| v.is_finite() && v > 0.0;

        let (min_scale, max_scale) = if positive(self.viewport.min_scale)
            && positive(self.viewport.max_scale)
        {
            (self.viewport.min_scale, self.viewport.max_scale)
        } else {
            log::warn!("Ignoring invalid zoom limits in config");
            (defaults.min_scale, defaults.max_scale)
        };
        let zoom_step = if positive(self.viewport.zoom_step) && self.viewport.zoom_step != 1.0 {
            self.viewport.zoom_step
        } else {
            log::warn!("Ignoring invalid zoom step {} in config", self.viewport.zoom_step);
            defaults.zoom_step
        };

        SessionSettings {
            min_scale,
            max_scale,
            zoom_step,
            auto_restart: self.quiz.auto_restart,
            restart_delay: Duration::from_millis(self.quiz.restart_delay_ms),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "winestudy-config.json"
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("winestudy").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("winestudy")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to a file, creating parent directories if needed.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save_to_path(&path)
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "winestudy-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }

    /// Save configuration to localStorage (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn save_to_local_storage(&self) -> Result<(), ConfigError> {
        let window = web_sys::window()
            .ok_or_else(|| ConfigError::StorageError("No window object available".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| ConfigError::StorageError(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| ConfigError::StorageError("localStorage not available".to_string()))?;

        let json = self.to_json()?;

        storage
            .set_item(Self::LOCALSTORAGE_KEY, &json)
            .map_err(|e| {
                ConfigError::StorageError(format!("Failed to save to localStorage: {:?}", e))
            })?;

        log::info!("Saved configuration to localStorage");
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    StorageError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_session_defaults() {
        assert_eq!(AppConfig::new().session_settings(), SessionSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = AppConfig::from_json(
            r#"{ "version": 1, "preferences": { "log_level": "debug" }, "quiz": { "auto_restart": false } }"#,
        )
        .unwrap();
        assert_eq!(config.app_name, "winestudy");
        assert_eq!(config.preferences.log_level, LogLevel::Debug);
        assert!(!config.quiz.auto_restart);
        assert_eq!(config.quiz.restart_delay_ms, 2000);
        assert_eq!(config.viewport, ViewportConfig::default());
    }

    #[test]
    fn test_newer_version_rejected() {
        let json = format!("{{ \"version\": {} }}", CONFIG_VERSION + 1);
        assert!(matches!(
            AppConfig::from_json(&json),
            Err(ConfigError::VersionTooNew { .. })
        ));
    }

    #[test]
    fn test_invalid_viewport_values_fall_back() {
        let mut config = AppConfig::new();
        config.viewport.min_scale = -1.0;
        config.viewport.zoom_step = 1.0;
        config.quiz.restart_delay_ms = 500;
        let settings = config.session_settings();
        assert_eq!(settings.min_scale, zoom::MIN);
        assert_eq!(settings.max_scale, zoom::MAX);
        assert_eq!(settings.zoom_step, zoom::STEP);
        assert_eq!(settings.restart_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_save_and_load_path() {
        let path = std::env::temp_dir()
            .join(format!("winestudy-config-test-{}", std::process::id()))
            .join(AppConfig::default_filename());
        let mut config = AppConfig::new();
        config.preferences.data_dir = "/srv/maps".to_string();
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
