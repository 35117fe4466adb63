//! Core error types for focusplan-core.
//!
//! The taxonomy separates benign absence (no plan file for any lookback
//! day, handled with `Option`), fatal schema mismatches on load, and
//! best-effort write failures that callers report without aborting.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Plan file encode/decode errors
    #[error("Plan file error: {0}")]
    Plan(#[from] PlanFileError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised while decoding a day plan file.
///
/// All of these indicate a corrupted or incompatible file and are fatal
/// for the load operation; the plan stays empty. Missing *optional* task
/// fields are not errors -- the decoder falls back to defaults.
#[derive(Error, Debug)]
pub enum PlanFileError {
    /// A fixed-size section disagrees with the expected layout.
    #[error("Schema mismatch in {section}: expected {expected}, found {found}")]
    SchemaMismatch {
        section: &'static str,
        expected: usize,
        found: usize,
    },

    /// A status line holds none of INCOMPLETE | IN_PROCESS | COMPLETE.
    #[error("Unknown task status: '{0}'")]
    UnknownStatus(String),

    /// A count line could not be parsed as a number.
    #[error("Bad count for {section}: '{value}'")]
    BadCount {
        section: &'static str,
        value: String,
    },

    /// The file ended inside a required section.
    #[error("Plan file truncated while reading {0}")]
    Truncated(&'static str),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Home/config directory could not be determined or created
    #[error("Cannot resolve data directory: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
