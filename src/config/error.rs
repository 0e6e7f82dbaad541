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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Log filter directive is empty")]
    EmptyLogFilter,

    #[error("Report threshold must be at least 1")]
    InvalidReportThreshold,

    #[error("Ban duration must be a positive number of days")]
    InvalidBanDuration,
}
