//! Shared utilities and common types for the VidTube server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON response envelope shared by every endpoint
//! - Field validation helpers

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CookieConfig, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, LogFormat, LoggingConfig, MediaBackend, MediaConfig, ServerConfig, StorageBackend,
};
pub use types::{ApiErrorBody, ApiResponse};
pub use utils::validation;
