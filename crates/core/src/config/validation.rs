//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::net::SocketAddr;

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `bind_addr` is not a parseable socket address
    /// - `wms_base_url` is empty or `user_agent` is empty
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `max_response_bytes` is 0 or exceeds 50MB
    /// - cache TTL, cache ceiling, or sweep interval is 0
    /// - `simplify_tolerance_deg` is negative or not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid {
                field: "bind_addr".into(),
                reason: "must be a socket address like 0.0.0.0:8080".into(),
            });
        }

        if self.wms_base_url.is_empty() {
            return Err(ConfigError::Invalid { field: "wms_base_url".into(), reason: "must not be empty".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.max_response_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_response_bytes".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.max_response_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid {
                field: "max_response_bytes".into(),
                reason: "must not exceed 50MB".into(),
            });
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid { field: "cache_ttl_secs".into(), reason: "must be at least 1".into() });
        }
        if self.cache_max_entries == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_max_entries".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "sweep_interval_secs".into(),
                reason: "must be at least 1".into(),
            });
        }

        if !self.simplify_tolerance_deg.is_finite() || self.simplify_tolerance_deg < 0.0 {
            return Err(ConfigError::Invalid {
                field: "simplify_tolerance_deg".into(),
                reason: "must be a finite value >= 0".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_bind_addr() {
        let config = AppConfig { bind_addr: "not-an-addr".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "bind_addr"));
    }

    #[test]
    fn test_validate_empty_wms_url() {
        let config = AppConfig { wms_base_url: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "wms_base_url"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { timeout_ms: 301_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_zero_cache_ceiling() {
        let config = AppConfig { cache_max_entries: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cache_max_entries"));
    }

    #[test]
    fn test_validate_negative_tolerance() {
        let config = AppConfig { simplify_tolerance_deg: -1e-4, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "simplify_tolerance_deg"));
    }

    #[test]
    fn test_validate_zero_tolerance_allowed() {
        let config = AppConfig { simplify_tolerance_deg: 0.0, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_edge_values() {
        let config = AppConfig { timeout_ms: 100, max_response_bytes: 1, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
