//! TOML-backed learner profile store.
//!
//! The profile is written once after onboarding and read at startup to
//! rebuild the personalization context.

use crate::paths::LecternPaths;
use async_trait::async_trait;
use lectern_core::{LearnerProfile, ProfileStore, Result};
use std::path::PathBuf;
use tracing::debug;

pub struct TomlProfileStore {
    path: PathBuf,
}

impl TomlProfileStore {
    /// Store at the default location (`~/.config/lectern/profile.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: LecternPaths::profile_file()?,
        })
    }

    /// Store at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProfileStore for TomlProfileStore {
    async fn save(&self, profile: &LearnerProfile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = toml::to_string_pretty(profile)?;
        tokio::fs::write(&self.path, raw).await?;
        debug!(path = %self.path.display(), "learner profile saved");
        Ok(())
    }

    async fn load(&self) -> Result<Option<LearnerProfile>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(toml::from_str(&raw)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
