//! Tally ledger configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Ledger connection and settlement policy
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Base URL used until the ledger-link document names one
    #[serde(default)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Report the payer's own share as paid instead of booking it
    #[serde(default = "default_skip_self_payment")]
    pub skip_self_payment: bool,
}

impl LedgerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=60).contains(&self.timeout_secs) {
            return Err(ValidationError::InvalidLedgerTimeout);
        }
        let url = self.base_url.trim();
        if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidLedgerUrl);
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            skip_self_payment: default_skip_self_payment(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_skip_self_payment() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.skip_self_payment);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn timeout_out_of_range_is_rejected() {
        for timeout_secs in [0, 61] {
            let config = LedgerConfig {
                timeout_secs,
                ..LedgerConfig::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidLedgerTimeout));
        }
    }

    #[test]
    fn url_needs_http_scheme() {
        let config = LedgerConfig {
            base_url: "strichliste.local".to_string(),
            ..LedgerConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidLedgerUrl));

        let config = LedgerConfig {
            base_url: "https://strichliste.local".to_string(),
            ..LedgerConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
