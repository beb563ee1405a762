//! Course assistant client backed by `POST /api/drone/chat`.
//!
//! The assistant answers questions about the course material and cites
//! the lesson pages it drew from.

use lectern_core::{LecternError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiEndpoints;
use crate::http::{build_client, map_http_error, parse_retry_after, transport_error};

#[derive(Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

/// An assistant answer plus the lesson sources it cites.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantReply {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

pub struct HttpAssistantClient {
    client: Client,
    endpoints: ApiEndpoints,
}

impl HttpAssistantClient {
    pub fn new(endpoints: ApiEndpoints) -> Result<Self> {
        Ok(Self {
            client: build_client(&endpoints)?,
            endpoints,
        })
    }

    /// Sends a question to the assistant.
    ///
    /// # Errors
    ///
    /// * `LecternError::AuthRequired` — assistant is gated on a session
    /// * `LecternError::Transform` — backend refused or failed the query
    pub async fn ask(&self, query: &str) -> Result<AssistantReply> {
        let url = self.endpoints.url("/api/drone/chat");
        debug!(%url, "dispatching assistant query");

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { query })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(LecternError::AuthRequired);
        }
        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, body, retry_after));
        }

        let reply: AssistantReply = response.json().await.map_err(|err| {
            LecternError::transform_status(
                status.as_u16(),
                format!("unusable assistant response: {err}"),
                false,
            )
        })?;
        Ok(reply)
    }
}
