//! Billing configuration
//!
//! Billing itself is out of scope; these settings only shape the inert
//! subscription flags carried on sessions.

use serde::Deserialize;

use super::error::ValidationError;

/// Subscription flag settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Days a premium upgrade stays active.
    #[serde(default = "default_premium_duration_days")]
    pub premium_duration_days: i64,
}

impl BillingConfig {
    /// Validate billing configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.premium_duration_days < 1 {
            return Err(ValidationError::InvalidPremiumDuration);
        }
        Ok(())
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            premium_duration_days: default_premium_duration_days(),
        }
    }
}

fn default_premium_duration_days() -> i64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_premium_duration_is_thirty_days() {
        let config = BillingConfig::default();
        assert_eq!(config.premium_duration_days, 30);
        assert!(config.validate().is_ok());
    }
}
