//! Core error types for studyroom-core.
//!
//! The scheduling engine and the timers never fail; errors only come from
//! the edges (configuration files and subject sheets).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// No home/config directory could be determined
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Unsupported file format
    #[error("Unsupported subject sheet format: {0}")]
    UnsupportedFormat(String),
}

impl ValidationError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_field() {
        let err = ValidationError::invalid("urgency", "must be between 1 and 5");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'urgency': must be between 1 and 5"
        );
    }

    #[test]
    fn core_error_wraps_config_error() {
        let err: CoreError = ConfigError::UnknownKey("planner.nope".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown config key: planner.nope"
        );
    }
}
