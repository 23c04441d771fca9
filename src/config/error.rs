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
    #[error("Minimum password length must be at least 1")]
    InvalidMinPasswordLength,

    #[error("Verification code TTL must be at least 1 minute")]
    InvalidCodeTtl,

    #[error("Premium duration must be at least 1 day")]
    InvalidPremiumDuration,
}
