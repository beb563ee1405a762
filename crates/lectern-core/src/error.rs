//! Error types for the Lectern application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Lectern application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every variant is non-fatal
/// from the reading surface's perspective: each one has a defined fallback
/// (the `Original` content mode).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LecternError {
    /// A transformed mode was requested without an authenticated session.
    #[error("Authentication required for this content mode")]
    AuthRequired,

    /// Session resolution is still in flight; gated actions are held,
    /// neither allowed nor denied.
    #[error("Session resolution pending, try again shortly")]
    SessionPending,

    /// The page's source text could not be extracted at trigger time.
    #[error("No source content available for this page")]
    EmptyContent,

    /// A mode that never touches the network was passed to the transform
    /// pipeline.
    #[error("Content mode '{0}' does not use the transform pipeline")]
    InvalidMode(String),

    /// A transform endpoint returned a non-success response or an
    /// unusable body.
    #[error("Transform request failed: {message}")]
    Transform {
        /// HTTP status code, if a response was received at all.
        status: Option<u16>,
        message: String,
        /// Whether retrying the same request may succeed.
        retryable: bool,
    },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LecternError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a Transform error for a response with a known status code.
    pub fn transform_status(status: u16, message: impl Into<String>, retryable: bool) -> Self {
        Self::Transform {
            status: Some(status),
            message: message.into(),
            retryable,
        }
    }

    /// Creates a Transform error for a request that never produced a
    /// response (connect failure, timeout).
    pub fn transform_transport(message: impl Into<String>) -> Self {
        Self::Transform {
            status: None,
            message: message.into(),
            retryable: true,
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an AuthRequired error
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }

    /// Check if this is a SessionPending error
    pub fn is_session_pending(&self) -> bool {
        matches!(self, Self::SessionPending)
    }

    /// Check if this is an EmptyContent error
    pub fn is_empty_content(&self) -> bool {
        matches!(self, Self::EmptyContent)
    }

    /// Check if this is a Transform error
    pub fn is_transform(&self) -> bool {
        matches!(self, Self::Transform { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether retrying the failed operation may succeed.
    ///
    /// Transform failures carry an explicit retryability flag; transport
    /// errors are always considered retryable. Gating errors are not —
    /// the session state has to change first.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transform { retryable, .. } => *retryable,
            Self::Http(_) => true,
            _ => false,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LecternError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LecternError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LecternError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LecternError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for LecternError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for LecternError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Conversion from String (for error messages)
impl From<String> for LecternError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, LecternError>`.
pub type Result<T> = std::result::Result<T, LecternError>;
