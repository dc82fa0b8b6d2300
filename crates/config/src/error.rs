//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading, validating, or resolving configuration
///
/// All of these are fatal and reported before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Required environment variable is unset or empty
    #[error("environment variable {var} is not set")]
    MissingEnv { var: String },

    /// Environment variable holds malformed JSON
    #[error("environment variable {var} is not valid JSON: {message}")]
    InvalidJson { var: String, message: String },

    /// Required field missing
    #[error("{component} '{name}' is missing required field '{field}'")]
    MissingField {
        /// Component type (e.g., "report", "shopware")
        component: &'static str,
        name: String,
        field: &'static str,
    },

    /// Invalid value
    #[error("{component} '{name}' has invalid {field}: {message}")]
    InvalidValue {
        component: &'static str,
        name: String,
        field: &'static str,
        message: String,
    },

    /// Report name not present in config
    #[error("unknown report '{name}'")]
    UnknownReport { name: String },

    /// No enabled reports
    #[error("no reports are enabled - configure at least one [reports.<name>] section")]
    NoReports,
}

impl ConfigError {
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnv { var: var.into() }
    }

    pub fn invalid_json(var: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidJson {
            var: var.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(
        component: &'static str,
        name: impl Into<String>,
        field: &'static str,
    ) -> Self {
        Self::MissingField {
            component,
            name: name.into(),
            field,
        }
    }

    pub fn invalid_value(
        component: &'static str,
        name: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            component,
            name: name.into(),
            field,
            message: message.into(),
        }
    }

    pub fn unknown_report(name: impl Into<String>) -> Self {
        Self::UnknownReport { name: name.into() }
    }
}
