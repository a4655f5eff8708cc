//! TOML-based application configuration.
//!
//! Stores startup preferences:
//! - Initial focus/break durations
//! - Speech voice parameters
//! - Whether to ask for notification permission at startup
//!
//! Configuration is read from `~/.config/focuswell/config.toml`. The file is
//! never written by a running session; duration edits last for the session only.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::config_path;
use crate::alerts::{Voice, DEFAULT_ICON, DEFAULT_LOCALE, DEFAULT_SPEECH_RATE};
use crate::error::ConfigError;
use crate::settings::{DurationSettings, DEFAULT_BREAK_MIN, DEFAULT_FOCUS_MIN};

/// Initial durations in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationsConfig {
    #[serde(default = "default_focus")]
    pub focus: u32,
    #[serde(default = "default_break", rename = "break")]
    pub break_: u32,
}

/// Alert channel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsConfig {
    #[serde(default = "default_true")]
    pub speech: bool,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_rate")]
    pub rate: f32,
    /// Request notification permission when the session starts.
    #[serde(default)]
    pub notifications: bool,
    #[serde(default = "default_icon")]
    pub icon: String,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub durations: DurationsConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
}

// Default functions
fn default_focus() -> u32 {
    DEFAULT_FOCUS_MIN
}
fn default_break() -> u32 {
    DEFAULT_BREAK_MIN
}
fn default_true() -> bool {
    true
}
fn default_locale() -> String {
    DEFAULT_LOCALE.into()
}
fn default_rate() -> f32 {
    DEFAULT_SPEECH_RATE
}
fn default_icon() -> String {
    DEFAULT_ICON.into()
}

impl Default for DurationsConfig {
    fn default() -> Self {
        Self {
            focus: default_focus(),
            break_: default_break(),
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            speech: true,
            locale: default_locale(),
            rate: default_rate(),
            notifications: false,
            icon: default_icon(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            durations: DurationsConfig::default(),
            alerts: AlertsConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Resolved location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be found and no override is set.
    pub fn path() -> Result<PathBuf, ConfigError> {
        config_path()
    }

    /// Load from the default location, or defaults when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, or defaults when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Parse TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration TOML.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Initial duration settings, clamped to at least one minute each.
    pub fn durations(&self) -> DurationSettings {
        DurationSettings::new(self.durations.focus, self.durations.break_)
    }

    pub fn voice(&self) -> Voice {
        Voice {
            locale: self.alerts.locale.clone(),
            rate: self.alerts.rate,
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable config");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(toml_str.contains("break = 5"));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("durations.focus").as_deref(), Some("25"));
        assert_eq!(cfg.get("durations.break").as_deref(), Some("5"));
        assert_eq!(cfg.get("alerts.locale").as_deref(), Some("en-US"));
        assert_eq!(cfg.get("alerts.notifications").as_deref(), Some("false"));
        assert!(cfg.get("alerts.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg = Config::parse("[durations]\nfocus = 50\n").unwrap();
        assert_eq!(cfg.durations.focus, 50);
        assert_eq!(cfg.durations.break_, 5);
        assert!(cfg.alerts.speech);
    }

    #[test]
    fn zero_durations_clamp_to_one_minute() {
        let cfg = Config::parse("[durations]\nfocus = 0\nbreak = 0\n").unwrap();
        let settings = cfg.durations();
        assert_eq!(settings.minutes(crate::settings::Mode::Focus), 1);
        assert_eq!(settings.minutes(crate::settings::Mode::Break), 1);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::parse("durations = [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[alerts]\nrate = 1.5\nnotifications = true\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.voice().rate, 1.5);
        assert!(cfg.alerts.notifications);
    }
}
