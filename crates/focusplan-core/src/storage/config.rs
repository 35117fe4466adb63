//! TOML-based application configuration.
//!
//! Holds the initial cycle durations and the plans directory. The cycle
//! settings here are starting values only -- reconfiguring a live session
//! is in-memory state and is never written back automatically.
//!
//! Configuration is stored at `~/.config/focusplan/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::data_dir;
use crate::cycle::CycleSettings;
use crate::error::ConfigError;

/// Cycle-specific configuration, minute granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleConfig {
    #[serde(default = "default_working_minutes")]
    pub working_minutes: u64,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u64,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u64,
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusplan/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub cycle: CycleConfig,
    /// Where the day plan files live. Defaults to `<data_dir>/plans`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plans_dir: Option<PathBuf>,
}

fn default_working_minutes() -> u64 {
    25
}
fn default_short_break_minutes() -> u64 {
    5
}
fn default_long_break_minutes() -> u64 {
    10
}
fn default_long_break_interval() -> u32 {
    4
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            working_minutes: default_working_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            long_break_interval: default_long_break_interval(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the default file on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|err| ConfigError::LoadFailed {
                path,
                message: err.to_string(),
            }),
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
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.clone(),
            message: err.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|err| ConfigError::SaveFailed {
            path,
            message: err.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Initial engine settings from the configured minutes.
    pub fn cycle_settings(&self) -> CycleSettings {
        CycleSettings {
            working: Duration::from_secs(self.cycle.working_minutes.saturating_mul(60)),
            short_break: Duration::from_secs(self.cycle.short_break_minutes.saturating_mul(60)),
            long_break: Duration::from_secs(self.cycle.long_break_minutes.saturating_mul(60)),
            long_break_interval: self.cycle.long_break_interval,
        }
    }

    /// Effective plans directory.
    pub fn plans_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.plans_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("plans")),
        }
    }
}
