//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

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
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `max_redirects` exceeds 10
    /// - `user_agent` is empty
    /// - `max_url_length` or `cache_expire_secs` is 0
    /// - `fallback_service_url` is not an http(s) URL prefix
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
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

        if self.max_redirects > 10 {
            return Err(ConfigError::Invalid { field: "max_redirects".into(), reason: "must not exceed 10".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.max_url_length == 0 {
            return Err(ConfigError::Invalid {
                field: "max_url_length".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.cache_expire_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_expire_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if !self.fallback_service_url.starts_with("http://") && !self.fallback_service_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                field: "fallback_service_url".into(),
                reason: "must start with http:// or https://".into(),
            });
        }

        if self.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for outbound fetches");
        }

        Ok(())
    }
}
