//! Application configuration tree.
//!
//! Loaded from `~/.config/lectern/config.toml` by the infrastructure
//! crate; every field has a sensible default so a missing file yields a
//! working local-development setup (API proxied on a fixed local port).

use crate::mode::ContentMode;
use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    // Local development default; production deployments serve the same
    // paths from the site origin or an equivalent reverse proxy.
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_docs_root() -> String {
    "docs".to_string()
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Origin the auth, transform, onboarding and assistant paths hang off.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Local content settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentConfig {
    /// Root of the documentation tree page paths resolve under.
    #[serde(default = "default_docs_root")]
    pub docs_root: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            docs_root: default_docs_root(),
        }
    }
}

/// Root configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

impl RootConfig {
    /// Path of the transform endpoint serving `mode`, relative to the API
    /// base URL. `Original` has no endpoint.
    pub fn transform_path(mode: ContentMode) -> Option<&'static str> {
        match mode {
            ContentMode::Original => None,
            ContentMode::Summary => Some("/api/ai/summarize"),
            ContentMode::Translation => Some("/api/ai/translate"),
            ContentMode::Personalized => Some("/api/ai/personalize-chapter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = RootConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 60);
        assert_eq!(config.content.docs_root, "docs");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: RootConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://docs.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://docs.example.com");
        assert_eq!(config.api.timeout_secs, 60);
    }

    #[test]
    fn every_transformed_mode_has_an_endpoint() {
        assert!(RootConfig::transform_path(ContentMode::Original).is_none());
        for mode in ContentMode::transformed() {
            assert!(RootConfig::transform_path(mode).is_some());
        }
    }
}
