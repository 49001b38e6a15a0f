//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::MAX_SNIPPETS;
use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field: field.into(), reason: reason.into() }
    }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` or `host` is empty
    /// - `max_snippets` is outside `1..=MAX_SNIPPETS`
    /// - `search_num` is outside `1..=100`
    /// - `organic_candidates` is outside `1..=10`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::invalid("max_bytes", "must be greater than 0"));
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::invalid("max_bytes", "must not exceed 50MB"));
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::invalid("user_agent", "must not be empty"));
        }

        if self.host.is_empty() {
            return Err(ConfigError::invalid("host", "must not be empty"));
        }

        if !(1..=MAX_SNIPPETS).contains(&self.max_snippets) {
            return Err(ConfigError::invalid("max_snippets", format!("must be between 1 and {MAX_SNIPPETS}")));
        }

        if !(1..=100).contains(&self.search_num) {
            return Err(ConfigError::invalid("search_num", "must be between 1 and 100"));
        }

        if !(1..=10).contains(&self.organic_candidates) {
            return Err(ConfigError::invalid("organic_candidates", "must be between 1 and 10"));
        }

        if usize::from(self.search_num) < self.organic_candidates {
            tracing::warn!(
                search_num = self.search_num,
                organic_candidates = self.organic_candidates,
                "search_num is lower than organic_candidates; fewer candidates will be tried"
            );
        }

        Ok(())
    }
}
