//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Minimum selection must be between 1 and {max} (got {got})")]
    InvalidMinSelection { got: usize, max: usize },

    #[error("Reflection length limit must be positive")]
    InvalidReflectionLimit,

    #[error("Live assessment limit must be positive")]
    InvalidMaxLiveAssessments,

    #[error("Export timeout must be between 1 and 600 seconds")]
    InvalidExportTimeout,

    #[error("Auth readiness timeout must be positive")]
    InvalidAuthTimeout,
}
