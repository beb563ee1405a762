//! Endpoint resolution for the backend API clients.
//!
//! Configuration priority: `LECTERN_API_BASE` environment variable >
//! config.toml `[api]` section > built-in local-development default.

use lectern_core::config::ApiConfig;
use std::env;
use std::time::Duration;

/// Resolved API origin and request timeout shared by every HTTP client.
#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    base_url: String,
    timeout: Duration,
}

impl ApiEndpoints {
    /// Builds endpoints from the config, honoring the `LECTERN_API_BASE`
    /// environment override.
    pub fn new(config: &ApiConfig) -> Self {
        let base_url = env::var("LECTERN_API_BASE").unwrap_or_else(|_| config.base_url.clone());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Endpoints rooted at an explicit origin, bypassing config and
    /// environment. Used by tests against a local mock server.
    pub fn from_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Absolute URL for an API path (`path` must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
