//! Page identity and source content models.
//!
//! A `PageId` is the stable identifier for "which document is currently
//! being viewed"; caches are scoped to it and async results resolved for a
//! different page are discarded. `SourceContent` is the page's plain text,
//! extracted once per page view and immutable for its duration.

use crate::error::{LecternError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for the document being viewed.
///
/// Stored as a normalized lesson path (`/docs/intro`, no trailing slash).
/// The backend identifies lessons deterministically, so the identifier also
/// exposes a UUID v5 derived from the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Creates a page identifier from a lesson path.
    ///
    /// The path is normalized: a leading slash is enforced and trailing
    /// slashes are stripped, so `/docs/intro/` and `docs/intro` identify
    /// the same page.
    pub fn new(path: impl AsRef<str>) -> Self {
        let trimmed = path.as_ref().trim().trim_end_matches('/');
        let normalized = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self(normalized)
    }

    /// The normalized lesson path sent to transform endpoints.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Deterministic UUID for this page, stable across processes.
    pub fn deterministic_uuid(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_URL, self.0.as_bytes())
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The original page text, read-only input to every transform request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContent(String);

impl SourceContent {
    /// Wraps extracted page text, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns `LecternError::EmptyContent` when the text is empty or
    /// whitespace-only, so no transform request is ever issued for it.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(LecternError::EmptyContent);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Port for extracting a page's plain-text content.
///
/// The reading surface never queries a rendered document tree directly;
/// whatever holds the content (a docs tree on disk, a DOM, a test fixture)
/// implements this trait instead.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Returns the current plain-text content of the given page.
    ///
    /// # Errors
    ///
    /// * `LecternError::NotFound` if the page does not exist
    /// * `LecternError::EmptyContent` if the page has no extractable text
    async fn load(&self, page: &PageId) -> Result<SourceContent>;
}
