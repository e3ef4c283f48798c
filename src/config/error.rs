//! Configuration error types

use thiserror::Error;

use crate::domain::foundation::GatewayError;

/// Errors that can occur while loading configuration or credentials
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Cannot read {path}: {reason}")]
    Credentials { path: String, reason: String },

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(#[from] GatewayError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("API v3 key must be exactly 32 bytes, got {0}")]
    InvalidApiV3KeyLength(usize),

    #[error("Gateway base URL must use HTTPS")]
    GatewayMustBeHttps,

    #[error("Invalid log level directive: {0}")]
    InvalidLogLevel(String),
}
