//! Onboarding workflow: submit the learner profile and keep a local copy.

use lectern_core::{LearnerProfile, OnboardingGateway, ProfileStore, Result};
use std::sync::Arc;
use tracing::info;

pub struct OnboardingService {
    gateway: Arc<dyn OnboardingGateway>,
    store: Arc<dyn ProfileStore>,
}

impl OnboardingService {
    pub fn new(gateway: Arc<dyn OnboardingGateway>, store: Arc<dyn ProfileStore>) -> Self {
        Self { gateway, store }
    }

    /// Submits the profile to the backend, then persists it locally so the
    /// personalization context survives restarts.
    ///
    /// The local copy is only written after the backend accepts the
    /// submission; a failed submit leaves any previous profile intact.
    pub async fn complete(&self, profile: LearnerProfile) -> Result<()> {
        self.gateway.submit(&profile).await?;
        self.store.save(&profile).await?;
        info!("onboarding completed");
        Ok(())
    }

    /// Personalization context from the stored profile, if onboarding ran.
    pub async fn personalization_context(&self) -> Result<Option<String>> {
        Ok(self.store.load().await?.map(|p| p.context_line()))
    }
}
