//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` crate. Every value has a default, so an empty environment yields
//! a working configuration. Values use the `REKINDLE` prefix with `__` as
//! the section separator.
//!
//! # Example
//!
//! ```no_run
//! use rekindle::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod billing;
mod error;

pub use auth::AuthConfig;
pub use billing::BillingConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Password and verification-code settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Subscription flag settings.
    #[serde(default)]
    pub billing: BillingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// - `REKINDLE__AUTH__MIN_PASSWORD_LENGTH=8` -> `auth.min_password_length = 8`
    /// - `REKINDLE__BILLING__PREMIUM_DURATION_DAYS=90` -> `billing.premium_duration_days = 90`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REKINDLE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.auth.validate()?;
        self.billing.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.auth.min_password_length, 4);
        assert_eq!(config.billing.premium_duration_days, 30);
    }
}
