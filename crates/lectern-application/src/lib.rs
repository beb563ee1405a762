//! Application services for the Lectern reading surface.
//!
//! Coordinates the domain contracts from `lectern-core`: the mode
//! controller gates and broadcasts mode changes, the transform cache
//! deduplicates backend calls, the view tracks what is on screen, and the
//! onboarding service runs the profile workflow.

pub mod controller;
pub mod onboarding_service;
pub mod transform_cache;
pub mod view;

pub use controller::ModeController;
pub use onboarding_service::OnboardingService;
pub use transform_cache::TransformCache;
pub use view::{ModeView, ViewState};
