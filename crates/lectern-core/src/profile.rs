//! Learner profile collected during onboarding.
//!
//! The backend uses the profile to personalize content; a local copy is
//! kept so the personalization context can be attached to later transform
//! requests without another round trip.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Self-reported skill level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
}

/// Onboarding answers, posted once to `/users/onboarding`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub programming_proficiency: Proficiency,
    pub ai_proficiency: Proficiency,
    /// Free-form hardware description (machine, GPU, robot kit).
    pub hardware_info: String,
}

impl LearnerProfile {
    /// One-line personalization context derived from the profile, attached
    /// to personalize requests.
    pub fn context_line(&self) -> String {
        format!(
            "programming: {}, ai: {}, hardware: {}",
            self.programming_proficiency, self.ai_proficiency, self.hardware_info
        )
    }
}

/// Port onto the backend's onboarding endpoint.
#[async_trait::async_trait]
pub trait OnboardingGateway: Send + Sync {
    /// Submits the profile; any 2xx response is success.
    async fn submit(&self, profile: &LearnerProfile) -> Result<()>;
}

/// Port for the locally persisted copy of the profile.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    async fn save(&self, profile: &LearnerProfile) -> Result<()>;

    /// Returns the stored profile, or `None` when onboarding has not run.
    async fn load(&self) -> Result<Option<LearnerProfile>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_with_backend_field_names() {
        let profile = LearnerProfile {
            programming_proficiency: Proficiency::Intermediate,
            ai_proficiency: Proficiency::Beginner,
            hardware_info: "RTX 4070, Jetson Nano".to_string(),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["programming_proficiency"], "intermediate");
        assert_eq!(json["ai_proficiency"], "beginner");
        assert_eq!(json["hardware_info"], "RTX 4070, Jetson Nano");
    }

    #[test]
    fn context_line_mentions_every_answer() {
        let profile = LearnerProfile {
            programming_proficiency: Proficiency::Advanced,
            ai_proficiency: Proficiency::Advanced,
            hardware_info: "laptop".to_string(),
        };
        let line = profile.context_line();
        assert!(line.contains("advanced"));
        assert!(line.contains("laptop"));
    }
}
