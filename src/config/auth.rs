//! Credential configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Password and verification-code settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Minimum accepted password length.
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Verification-code validity window in minutes.
    #[serde(default = "default_code_ttl_minutes")]
    pub code_ttl_minutes: i64,
}

impl AuthConfig {
    /// Validate credential configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_password_length == 0 {
            return Err(ValidationError::InvalidMinPasswordLength);
        }
        if self.code_ttl_minutes < 1 {
            return Err(ValidationError::InvalidCodeTtl);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            code_ttl_minutes: default_code_ttl_minutes(),
        }
    }
}

fn default_min_password_length() -> usize {
    4
}

fn default_code_ttl_minutes() -> i64 {
    15
}
