//! Infrastructure adapters: filesystem-backed content source, TOML
//! configuration and profile storage, and path resolution.

pub mod config_service;
pub mod content_source;
pub mod paths;
pub mod profile_store;

pub use config_service::ConfigService;
pub use content_source::DirContentSource;
pub use paths::LecternPaths;
pub use profile_store::TomlProfileStore;
