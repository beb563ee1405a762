//! Shared HTTP plumbing for the backend API clients.
//!
//! The backend wraps errors as `{"detail": "..."}`; these helpers unwrap
//! that envelope and classify statuses into retryable and terminal
//! failures.

use lectern_core::LecternError;
use reqwest::header::HeaderValue;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::ApiEndpoints;

/// Error envelope used by the backend for every non-2xx response.
#[derive(Deserialize)]
struct ErrorResponse {
    detail: String,
}

/// Builds the shared HTTP client: cookie jar enabled so the auth session
/// cookie set at sign-in rides along on every request.
pub(crate) fn build_client(endpoints: &ApiEndpoints) -> Result<Client, LecternError> {
    Client::builder()
        .cookie_store(true)
        .timeout(endpoints.timeout())
        .build()
        .map_err(LecternError::from)
}

/// Maps a transport-level failure (connect, timeout, TLS) to a retryable
/// transform error.
pub(crate) fn transport_error(err: reqwest::Error) -> LecternError {
    LecternError::transform_transport(format!("request failed: {err}"))
}

/// Maps a non-success response to a `Transform` error, extracting the
/// backend's `detail` message when the body carries one.
pub(crate) fn map_http_error(
    status: StatusCode,
    body: String,
    retry_after: Option<Duration>,
) -> LecternError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.detail)
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    ) || retry_after.is_some();

    if let Some(delay) = retry_after {
        debug!(status = status.as_u16(), ?delay, "backend asked to retry later");
    }

    LecternError::transform_status(status.as_u16(), message, is_retryable)
}

/// Parses a `Retry-After` header given in seconds. HTTP-date values are
/// not parsed.
pub(crate) fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    value.parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_envelope_is_unwrapped() {
        let err = map_http_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": "content must not be empty"}"#.to_string(),
            None,
        );
        assert_eq!(
            err.to_string(),
            "Transform request failed: content must not be empty"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn plain_body_is_kept_verbatim() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string(), None);
        assert!(err.to_string().contains("upstream down"));
        assert!(err.is_retryable());
    }

    #[test]
    fn retry_after_seconds_are_parsed() {
        let header = HeaderValue::from_static("12");
        assert_eq!(
            parse_retry_after(Some(&header)),
            Some(Duration::from_secs(12))
        );
        let date = HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT");
        assert_eq!(parse_retry_after(Some(&date)), None);
    }

    #[test]
    fn retry_after_makes_any_status_retryable() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"detail": "rate limited"}"#.to_string(),
            Some(Duration::from_secs(3)),
        );
        assert!(err.is_retryable());
    }
}
