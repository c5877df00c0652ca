//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - JWT secrets, token lifetimes and session cookie attributes
//! - `database` - Storage backend and MySQL pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `media` - Avatar / cover image upload service
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod media;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub use auth::{AuthConfig, CookieConfig, JwtConfig};
pub use database::{DatabaseConfig, StorageBackend};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use media::{MediaBackend, MediaConfig};
pub use server::{CorsConfig, ServerConfig};

/// Configuration rejected at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("access and refresh tokens must be signed with different secrets")]
    SharedTokenSecret,

    #[error("token lifetime for {0} must be positive")]
    NonPositiveTtl(&'static str),

    #[error("default JWT secrets are not allowed in {0}")]
    DefaultSecret(Environment),

    #[error("missing required setting {0}")]
    Missing(&'static str),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub media: MediaConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Configuration for local development and tests: in-memory storage and
    /// media, permissive CORS, cookies usable over plain HTTP.
    pub fn development() -> Self {
        let mut auth = AuthConfig::default();
        auth.cookies.secure = false;
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8000),
            database: DatabaseConfig::default(),
            auth,
            media: MediaConfig::default(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut cors = CorsConfig::from_env();
        if cors.allowed_origins.is_empty() && environment.is_development() {
            cors = CorsConfig::development();
        }
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            media: MediaConfig::from_env(),
            cors,
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Reject settings the server must not start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt = &self.auth.jwt;
        if jwt.access_secret == jwt.refresh_secret {
            return Err(ConfigError::SharedTokenSecret);
        }
        if jwt.access_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveTtl("access token"));
        }
        if jwt.refresh_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveTtl("refresh token"));
        }
        if self.environment.is_production() && jwt.is_using_default_secret() {
            return Err(ConfigError::DefaultSecret(self.environment));
        }
        if self.media.backend == MediaBackend::Cloudinary {
            if self.media.cloud_name.is_empty() {
                return Err(ConfigError::Missing("CLOUDINARY_CLOUD_NAME"));
            }
            if self.media.upload_preset.is_empty() {
                return Err(ConfigError::Missing("CLOUDINARY_UPLOAD_PRESET"));
            }
        }
        Ok(())
    }
}

/// Read and parse an environment variable, falling back to `default` when it
/// is unset or unparsable.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
