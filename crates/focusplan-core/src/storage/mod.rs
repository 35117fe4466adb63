mod config;

pub use config::{Config, CycleConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/focusplan[-dev]/` based on FOCUSPLAN_ENV.
///
/// Set FOCUSPLAN_ENV=dev to use the development data directory, or
/// FOCUSPLAN_DATA_DIR to point somewhere else entirely (used by tests).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var("FOCUSPLAN_DATA_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSPLAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusplan-dev")
            } else {
                base_dir.join("focusplan")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|err| ConfigError::DataDir(err.to_string()))?;
    Ok(dir)
}
