//! Transform request model and the backend port.

use crate::error::Result;
use crate::mode::ContentMode;
use crate::page::{PageId, SourceContent};
use serde::Serialize;

/// One outbound transform request: the full source text of a page plus the
/// identifiers the backend needs to key its own state by lesson.
#[derive(Debug, Clone, Serialize)]
pub struct TransformRequest {
    /// Full plain-text content of the page.
    pub content: String,
    /// Normalized lesson path, used by the backend for deterministic
    /// identification of the content.
    pub lesson_url: String,
    /// Optional personalization context (e.g. the viewer's proficiency),
    /// omitted from the wire when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl TransformRequest {
    pub fn new(source: &SourceContent, page: &PageId) -> Self {
        Self {
            content: source.as_str().to_string(),
            lesson_url: page.as_str().to_string(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Port onto the external transform endpoints, one endpoint per mode.
///
/// Implementations map a non-`Original` mode to its endpoint, send the
/// request with credentials included, and return the transformed text from
/// a `{output}` response body.
#[async_trait::async_trait]
pub trait TransformBackend: Send + Sync {
    /// Converts the request's source text into the derived text for `mode`.
    ///
    /// # Errors
    ///
    /// * `LecternError::InvalidMode` if `mode` is `Original`
    /// * `LecternError::AuthRequired` on a 401 from the endpoint
    /// * `LecternError::Transform` on any other failure
    async fn transform(&self, mode: ContentMode, request: TransformRequest) -> Result<String>;
}
