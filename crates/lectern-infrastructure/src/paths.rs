//! Unified path management for lectern configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/lectern/           # Config directory
//! ├── config.toml              # Application configuration
//! └── profile.toml             # Learner profile saved after onboarding
//! ```

use lectern_core::{LecternError, Result};
use std::path::PathBuf;

/// Unified path management for lectern.
pub struct LecternPaths;

impl LecternPaths {
    /// Returns the lectern configuration directory
    /// (e.g., `~/.config/lectern/`).
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the platform config directory cannot be
    /// determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("lectern"))
            .ok_or_else(|| LecternError::config("cannot determine the config directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the stored learner profile.
    pub fn profile_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("profile.toml"))
    }
}
