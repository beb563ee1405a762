//! Viewer session models and the session provider port.
//!
//! The session itself is owned by an external auth provider; this system
//! only ever reads it. All components hold a possibly-stale view that is
//! refreshed asynchronously.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Proof of authenticated identity, as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque user identifier assigned by the auth provider.
    pub user_id: String,
    pub email: String,
    /// Display name, when the provider supplies one.
    pub display_name: Option<String>,
    /// Session expiry as an RFC3339 timestamp.
    pub expires_at: Option<String>,
}

/// The gate's view of the viewer's authentication state.
///
/// `Pending` is a distinct state, not an absence: while resolution is in
/// flight every gated action is held — neither allowed nor denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SessionState {
    /// Resolution request still in flight.
    Pending,
    /// Resolved: no session present.
    Anonymous,
    /// Resolved: the viewer is signed in.
    Authenticated(Session),
}

impl SessionState {
    /// Whether gated actions may proceed.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The session record, when resolved and present.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Port onto the external auth provider.
///
/// Implementations resolve the session cookie asynchronously; callers must
/// treat `SessionState::Pending` as "not yet permitted" rather than as a
/// denial.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the current view of the session, refreshing it if stale.
    async fn current(&self) -> Result<SessionState>;

    /// Invalidates the provider-side session.
    async fn sign_out(&self) -> Result<()>;

    /// URL the viewer is sent to for the redirect-based sign-in flow.
    fn sign_in_url(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            user_id: "u-1".to_string(),
            email: "ada@example.com".to_string(),
            display_name: Some("Ada".to_string()),
            expires_at: None,
        }
    }

    #[test]
    fn pending_is_neither_allowed_nor_denied() {
        let state = SessionState::Pending;
        assert!(state.is_pending());
        assert!(!state.is_authenticated());
        assert!(state.session().is_none());
    }

    #[test]
    fn authenticated_exposes_session() {
        let state = SessionState::Authenticated(session());
        assert!(state.is_authenticated());
        assert_eq!(state.session().unwrap().email, "ada@example.com");
    }

    #[test]
    fn state_serde_is_tagged() {
        let json = serde_json::to_string(&SessionState::Anonymous).unwrap();
        assert_eq!(json, "{\"type\":\"anonymous\"}");
    }
}
