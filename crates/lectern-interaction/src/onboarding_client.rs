//! Onboarding gateway backed by `POST /users/onboarding`.

use async_trait::async_trait;
use lectern_core::{LearnerProfile, LecternError, OnboardingGateway, Result};
use reqwest::{Client, StatusCode};
use tracing::info;

use crate::config::ApiEndpoints;
use crate::http::{build_client, map_http_error, parse_retry_after, transport_error};

pub struct HttpOnboardingClient {
    client: Client,
    endpoints: ApiEndpoints,
}

impl HttpOnboardingClient {
    pub fn new(endpoints: ApiEndpoints) -> Result<Self> {
        Ok(Self {
            client: build_client(&endpoints)?,
            endpoints,
        })
    }
}

#[async_trait]
impl OnboardingGateway for HttpOnboardingClient {
    async fn submit(&self, profile: &LearnerProfile) -> Result<()> {
        let url = self.endpoints.url("/users/onboarding");
        let response = self
            .client
            .post(&url)
            .json(profile)
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

        info!("learner profile submitted");
        Ok(())
    }
}
