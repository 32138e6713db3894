//! TOML-based application configuration.
//!
//! Stores the active user and autosave tuning. Configuration lives at
//! `~/.config/humanos/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

fn default_user() -> String {
    "default".to_string()
}

fn default_debounce_secs() -> u64 {
    1
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/humanos/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User whose record the CLI operates on.
    #[serde(default = "default_user")]
    pub active_user: String,
    /// Debounce window for coalescing saves, in seconds.
    #[serde(default = "default_debounce_secs")]
    pub autosave_debounce_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            active_user: default_user(),
            autosave_debounce_secs: default_debounce_secs(),
        }
    }
}

impl AppConfig {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/humanos"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return (and write) the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "active_user" => Some(self.active_user.clone()),
            "autosave_debounce_secs" => Some(self.autosave_debounce_secs.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key. Returns an error if the key is unknown
    /// or the value cannot be parsed.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, unparseable values, or a
    /// failed save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "active_user" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: "cannot be empty".to_string(),
                    });
                }
                self.active_user = value.to_string();
            }
            "autosave_debounce_secs" => {
                self.autosave_debounce_secs =
                    value.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.save()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = AppConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.active_user, "default");
        assert_eq!(parsed.autosave_debounce_secs, 1);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: AppConfig = toml::from_str("active_user = \"mira\"").unwrap();
        assert_eq!(parsed.active_user, "mira");
        assert_eq!(parsed.autosave_debounce_secs, 1);
    }

    #[test]
    fn get_known_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("active_user").as_deref(), Some("default"));
        assert_eq!(cfg.get("autosave_debounce_secs").as_deref(), Some("1"));
        assert!(cfg.get("missing").is_none());
    }
}
