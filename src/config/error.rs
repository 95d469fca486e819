//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Host must not be empty")]
    EmptyHost,

    #[error("Probe timeout must be between 1 and 60 seconds")]
    InvalidProbeTimeout,

    #[error("Call timeout must be at least 1 second")]
    InvalidCallTimeout,

    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),
}
