mod config;

pub use config::{AlertsConfig, Config, DurationsConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/focuswell[-dev]/` based on FOCUSWELL_ENV.
///
/// Set FOCUSWELL_ENV=dev to use the development directory. Nothing is
/// created on disk.
///
/// # Errors
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(".config");

    let env = std::env::var("FOCUSWELL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focuswell-dev")
    } else {
        base_dir.join("focuswell")
    };
    Ok(dir)
}

/// Config file location; FOCUSWELL_CONFIG overrides the full path.
///
/// # Errors
/// Returns an error if no override is set and the home directory cannot be determined.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    if let Ok(path) = std::env::var("FOCUSWELL_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    Ok(config_dir()?.join("config.toml"))
}
