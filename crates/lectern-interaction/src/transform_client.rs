//! HTTP transform backend.
//!
//! Each transformed content mode maps to one backend endpoint
//! (`/api/ai/summarize`, `/api/ai/translate`, `/api/ai/personalize-chapter`);
//! all three accept the same request shape and answer `{"output": "..."}`.

use async_trait::async_trait;
use lectern_core::config::RootConfig;
use lectern_core::{ContentMode, LecternError, Result, TransformBackend, TransformRequest};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::ApiEndpoints;
use crate::http::{build_client, map_http_error, parse_retry_after, transport_error};

#[derive(Deserialize)]
struct TransformResponse {
    output: String,
}

/// Transform backend that talks to the docs-site AI endpoints.
#[derive(Clone)]
pub struct HttpTransformClient {
    client: Client,
    endpoints: ApiEndpoints,
}

impl HttpTransformClient {
    /// Creates a client against the configured API origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(endpoints: ApiEndpoints) -> Result<Self> {
        Ok(Self {
            client: build_client(&endpoints)?,
            endpoints,
        })
    }
}

#[async_trait]
impl TransformBackend for HttpTransformClient {
    async fn transform(&self, mode: ContentMode, request: TransformRequest) -> Result<String> {
        let path = RootConfig::transform_path(mode)
            .ok_or_else(|| LecternError::InvalidMode(mode.to_string()))?;
        let url = self.endpoints.url(path);
        debug!(%mode, %url, "dispatching transform request");

        let response = self
            .client
            .post(&url)
            .json(&request)
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

        let parsed: TransformResponse = response.json().await.map_err(|err| {
            LecternError::transform_status(
                status.as_u16(),
                format!("unusable transform response: {err}"),
                false,
            )
        })?;
        Ok(parsed.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_core::{PageId, SourceContent};

    fn request() -> TransformRequest {
        TransformRequest::new(
            &SourceContent::new("# ROS 2 Nodes\n\nA node is a process.").unwrap(),
            &PageId::new("/docs/module-1/ros2-nodes"),
        )
    }

    #[tokio::test]
    async fn summarize_returns_the_output_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/ai/summarize")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(r#"{"output": "Nodes are processes."}"#)
            .create_async()
            .await;

        let client =
            HttpTransformClient::new(ApiEndpoints::from_base_url(server.url())).unwrap();
        let output = client
            .transform(ContentMode::Summary, request())
            .await
            .unwrap();

        assert_eq!(output, "Nodes are processes.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn request_body_carries_content_and_lesson_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/ai/translate")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "content": "# ROS 2 Nodes\n\nA node is a process.",
                "lesson_url": "/docs/module-1/ros2-nodes",
            })))
            .with_status(200)
            .with_body(r#"{"output": "ترجمہ"}"#)
            .create_async()
            .await;

        let client =
            HttpTransformClient::new(ApiEndpoints::from_base_url(server.url())).unwrap();
        client
            .transform(ContentMode::Translation, request())
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_required() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/ai/personalize-chapter")
            .with_status(401)
            .with_body(r#"{"detail": "Not authenticated"}"#)
            .create_async()
            .await;

        let client =
            HttpTransformClient::new(ApiEndpoints::from_base_url(server.url())).unwrap();
        let err = client
            .transform(ContentMode::Personalized, request())
            .await
            .unwrap_err();
        assert!(err.is_auth_required());
    }

    #[tokio::test]
    async fn server_error_is_retryable_with_detail_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/ai/summarize")
            .with_status(500)
            .with_body(r#"{"detail": "model unavailable"}"#)
            .create_async()
            .await;

        let client =
            HttpTransformClient::new(ApiEndpoints::from_base_url(server.url())).unwrap();
        let err = client
            .transform(ContentMode::Summary, request())
            .await
            .unwrap_err();

        assert!(err.is_transform());
        assert!(err.is_retryable());
        assert!(err.to_string().contains("model unavailable"));
    }

    #[tokio::test]
    async fn malformed_success_body_is_not_retryable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/ai/summarize")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client =
            HttpTransformClient::new(ApiEndpoints::from_base_url(server.url())).unwrap();
        let err = client
            .transform(ContentMode::Summary, request())
            .await
            .unwrap_err();
        assert!(err.is_transform());
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn original_mode_never_reaches_the_network() {
        let client = HttpTransformClient::new(ApiEndpoints::from_base_url(
            "http://127.0.0.1:1", // nothing listens here
        ))
        .unwrap();
        let err = client
            .transform(ContentMode::Original, request())
            .await
            .unwrap_err();
        assert!(matches!(err, LecternError::InvalidMode(_)));
    }
}
