//! Content mode types for the reading surface.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The presentation variant selected for the currently viewed page.
///
/// Exactly one mode is active per reading surface at any time. `Original`
/// is always valid, requires no network access and no authentication; every
/// other mode is fetched from a transform endpoint and gated on a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentMode {
    /// The page's own rendered content, untouched.
    Original,
    /// AI-generated lesson summary.
    Summary,
    /// AI rewrite adjusted to the viewer's proficiency profile.
    Personalized,
    /// Urdu translation of the lesson.
    Translation,
}

impl ContentMode {
    /// Whether this is the untransformed mode.
    pub fn is_original(&self) -> bool {
        matches!(self, Self::Original)
    }

    /// Whether entering this mode requires an authenticated session.
    ///
    /// Equivalent to `!is_original()` today, but kept separate: the gate is
    /// a policy, not a structural property of the enum.
    pub fn requires_session(&self) -> bool {
        !self.is_original()
    }

    /// All modes that go through the transform pipeline.
    pub fn transformed() -> impl Iterator<Item = ContentMode> {
        Self::iter().filter(|mode| !mode.is_original())
    }

    /// Short human-readable heading used by the reading surface.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Summary => "Summary",
            Self::Personalized => "Personalized",
            Self::Translation => "Urdu Translation",
        }
    }
}

impl Default for ContentMode {
    fn default() -> Self {
        Self::Original
    }
}
