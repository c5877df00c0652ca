//! # Infrastructure Layer
//!
//! Concrete implementations of the repository and collaborator traits
//! declared in `vt_core`.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementations using SQLx
//! - **Memory**: process-local stores for development and tests
//! - **Media**: Cloudinary uploads over reqwest, plus an in-memory store
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use vt_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// In-memory account, session and channel store
pub mod memory;

/// Media upload backends
pub mod media;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlAccountRepository, MySqlChannelRepository};
pub use media::{CloudinaryMediaStore, InMemoryMediaStore};
pub use memory::InMemoryStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
