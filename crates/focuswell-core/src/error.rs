//! Core error types for focuswell-core.
//!
//! The timer engines themselves never fail; errors only come from the
//! configuration layer and from host capabilities behind the alert dispatcher.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focuswell-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Speech or notification host errors surfaced outside the dispatcher
    #[error("Alert error: {0}")]
    Alert(#[from] AlertError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home directory could not be resolved and no override was given
    #[error("Cannot determine configuration directory")]
    NoConfigDir,
}

/// Errors raised by speech or notification hosts.
///
/// The dispatcher never propagates these; they are logged and dropped.
#[derive(Error, Debug)]
pub enum AlertError {
    /// No usable speech synthesiser on this host
    #[error("speech synthesis unavailable")]
    SpeechUnavailable,

    /// The speech command could not be launched
    #[error("speech failed: {0}")]
    SpeechFailed(String),

    /// The notification could not be shown
    #[error("notification failed: {0}")]
    NotificationFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn speak_or_fail() -> Result<()> {
        Err(AlertError::SpeechFailed("espeak: not found".into()))?;
        Ok(())
    }

    #[test]
    fn alert_error_lifts_into_core_error() {
        let err = speak_or_fail().unwrap_err();
        assert!(matches!(err, CoreError::Alert(AlertError::SpeechFailed(_))));
        assert_eq!(err.to_string(), "Alert error: speech failed: espeak: not found");
    }

    #[test]
    fn toml_errors_become_parse_failures() {
        let err: ConfigError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
        let core: CoreError = err.into();
        assert!(core.to_string().starts_with("Configuration error:"));
    }
}
