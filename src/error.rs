//! Error types for Cloudscope
//!
//! The cache itself never fails; these cover the provider calls a cache miss
//! triggers and the configuration layer.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for Cloudscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors returned by the remote provider behind a cache miss
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Access denied for profile '{0}'. Check the credentials of the active profile.")]
    AccessDenied(String),

    #[error("Request throttled by provider. Retry after {0:?}")]
    Throttled(Duration),

    #[error("Network error: {0}")]
    Network(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
