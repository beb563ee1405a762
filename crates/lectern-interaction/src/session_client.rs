//! Session provider backed by the auth service.
//!
//! `GET /api/auth/get-session` answers a camelCase envelope when a session
//! cookie is present and a literal `null` otherwise. The last resolved
//! state is cached so callers can distinguish "not yet resolved"
//! (`Pending`) from a resolved anonymous visit.

use async_trait::async_trait;
use lectern_core::{LecternError, Result, Session, SessionProvider, SessionState};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::ApiEndpoints;
use crate::http::build_client;

#[derive(Deserialize)]
struct SessionEnvelope {
    session: SessionBody,
    user: UserBody,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionBody {
    expires_at: Option<String>,
}

#[derive(Deserialize)]
struct UserBody {
    id: String,
    email: String,
    name: Option<String>,
}

impl From<SessionEnvelope> for Session {
    fn from(envelope: SessionEnvelope) -> Self {
        Session {
            user_id: envelope.user.id,
            email: envelope.user.email,
            display_name: envelope.user.name,
            expires_at: envelope.session.expires_at,
        }
    }
}

/// Session provider that resolves against the auth endpoints.
pub struct HttpSessionClient {
    client: Client,
    endpoints: ApiEndpoints,
    last_known: RwLock<SessionState>,
}

impl HttpSessionClient {
    pub fn new(endpoints: ApiEndpoints) -> Result<Self> {
        Ok(Self {
            client: build_client(&endpoints)?,
            endpoints,
            last_known: RwLock::new(SessionState::Pending),
        })
    }

    /// Last resolved state without touching the network. `Pending` until
    /// the first `current()` call completes.
    pub async fn last_known(&self) -> SessionState {
        self.last_known.read().await.clone()
    }

    async fn fetch(&self) -> Result<SessionState> {
        let url = self.endpoints.url("/api/auth/get-session");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| LecternError::Http(format!("session lookup failed: {err}")))?;

        if !response.status().is_success() {
            return Err(LecternError::Http(format!(
                "session lookup returned {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(SessionState::Anonymous);
        }
        let envelope: Option<SessionEnvelope> = serde_json::from_str(&body)?;
        Ok(match envelope {
            Some(envelope) => SessionState::Authenticated(envelope.into()),
            None => SessionState::Anonymous,
        })
    }
}

#[async_trait]
impl SessionProvider for HttpSessionClient {
    async fn current(&self) -> Result<SessionState> {
        let state = self.fetch().await?;
        debug!(authenticated = state.is_authenticated(), "session resolved");
        *self.last_known.write().await = state.clone();
        Ok(state)
    }

    async fn sign_out(&self) -> Result<()> {
        let url = self.endpoints.url("/api/auth/sign-out");
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|err| LecternError::Http(format!("sign-out failed: {err}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status.is_success() {
            // Already signed out counts as signed out.
            *self.last_known.write().await = SessionState::Anonymous;
            info!("session ended");
            return Ok(());
        }
        Err(LecternError::Http(format!("sign-out returned {status}")))
    }

    fn sign_in_url(&self) -> String {
        self.endpoints.url("/api/auth/sign-in")
    }
}
