//! Application wiring.
//!
//! Builds the full object graph once at startup: configuration, HTTP
//! clients, the mode signal bus, the controller, and the transform cache.

use lectern_application::{ModeController, OnboardingService, TransformCache};
use lectern_core::config::RootConfig;
use lectern_core::{ModeSignalBus, Result, SessionProvider};
use lectern_infrastructure::{ConfigService, DirContentSource, TomlProfileStore};
use lectern_interaction::{
    ApiEndpoints, HttpAssistantClient, HttpOnboardingClient, HttpSessionClient,
    HttpTransformClient,
};
use std::sync::Arc;
use tracing::debug;

pub struct App {
    pub config: RootConfig,
    pub bus: Arc<ModeSignalBus>,
    pub sessions: Arc<HttpSessionClient>,
    pub controller: ModeController,
    pub cache: Arc<TransformCache>,
    pub content: DirContentSource,
    pub onboarding: OnboardingService,
    pub assistant: HttpAssistantClient,
}

impl App {
    /// Builds the application from the on-disk configuration.
    pub async fn bootstrap() -> Result<Self> {
        let config = ConfigService::new().get_config();
        let endpoints = ApiEndpoints::new(&config.api);
        debug!(base_url = endpoints.base_url(), "api endpoints resolved");

        let sessions = Arc::new(HttpSessionClient::new(endpoints.clone())?);
        let transform = Arc::new(HttpTransformClient::new(endpoints.clone())?);
        let onboarding_gateway = Arc::new(HttpOnboardingClient::new(endpoints.clone())?);
        let assistant = HttpAssistantClient::new(endpoints)?;
        let profile_store = Arc::new(TomlProfileStore::new()?);

        let bus = Arc::new(ModeSignalBus::default());
        let controller = ModeController::new(
            sessions.clone() as Arc<dyn SessionProvider>,
            bus.clone(),
        );
        let cache = Arc::new(TransformCache::new(transform));
        let onboarding = OnboardingService::new(onboarding_gateway, profile_store);

        // Rebuild the personalization context from a profile saved by an
        // earlier onboarding run.
        if let Some(context) = onboarding.personalization_context().await? {
            cache.set_context(Some(context));
        }

        let content = DirContentSource::new(&config.content.docs_root);

        Ok(Self {
            config,
            bus,
            sessions,
            controller,
            cache,
            content,
            onboarding,
            assistant,
        })
    }
}
