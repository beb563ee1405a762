//! Configuration service implementation.
//!
//! Loads the root configuration from `~/.config/lectern/config.toml`,
//! writing a default file on first run so users have something to edit.

use crate::paths::LecternPaths;
use lectern_core::config::RootConfig;
use lectern_core::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::warn;

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Cached configuration, loaded lazily on first access.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A missing or unreadable file yields the defaults; configuration
    /// problems never stop the application from starting.
    pub fn get_config(&self) -> RootConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = Self::load_config().unwrap_or_else(|err| {
            warn!(%err, "falling back to default configuration");
            RootConfig::default()
        });

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    fn load_config() -> Result<RootConfig> {
        let config_path = LecternPaths::config_file()?;
        Self::load_from_path(&config_path)
    }

    /// Loads the config from an explicit path, writing a default file when
    /// none exists yet.
    pub fn load_from_path(path: &Path) -> Result<RootConfig> {
        if !path.exists() {
            let default_config = RootConfig::default();
            Self::write_default(path, &default_config)?;
            return Ok(default_config);
        }

        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    fn write_default(path: &Path, config: &RootConfig) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(config)?)?;
        Ok(())
    }

    /// Path of the configuration file in use.
    pub fn config_path() -> Result<PathBuf> {
        LecternPaths::config_file()
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
