//! Domain models and contracts for the Lectern reading surface.
//!
//! This crate holds the pure coordination layer: content modes, page
//! identity, session state, the mode signal bus, and the ports onto the
//! external collaborators (auth provider, transform endpoints, content
//! source). No I/O happens here.

pub mod config;
pub mod error;
pub mod mode;
pub mod page;
pub mod profile;
pub mod session;
pub mod signal;
pub mod transform;

// Re-export common error type
pub use error::{LecternError, Result};
pub use profile::{LearnerProfile, OnboardingGateway, Proficiency, ProfileStore};
pub use mode::ContentMode;
pub use page::{ContentSource, PageId, SourceContent};
pub use session::{Session, SessionProvider, SessionState};
pub use signal::{ModeChange, ModeSignalBus};
pub use transform::{TransformBackend, TransformRequest};
