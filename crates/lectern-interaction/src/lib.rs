//! HTTP clients for the external collaborators of the reading surface:
//! the auth provider, the transform endpoints, the onboarding endpoint,
//! and the course assistant.
//!
//! All clients share one convention: cookie-based auth rides along on
//! every request, non-2xx responses unwrap the backend's `{"detail"}`
//! envelope, and 401 always maps to `LecternError::AuthRequired`.

pub mod assistant_client;
pub mod config;
mod http;
pub mod onboarding_client;
pub mod session_client;
pub mod transform_client;

pub use assistant_client::{AssistantReply, HttpAssistantClient};
pub use config::ApiEndpoints;
pub use onboarding_client::HttpOnboardingClient;
pub use session_client::HttpSessionClient;
pub use transform_client::HttpTransformClient;
