//! Shared configuration library for Koinonia.
//!
//! Centralizes `.env` loading, environment parsing, defaults, and
//! validation so the server binary and integration tests share a single
//! source of truth for config defaults and guard rails.

pub mod loader;
pub mod models;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};
pub use models::{
    AuthConfig, BroadcastConfig, Config, ConfigMetadata, CorsConfig,
    DatabaseConfig, MediaConfig, ServerConfig,
};
pub use models::{ConfigWarning, ConfigWarnings};
