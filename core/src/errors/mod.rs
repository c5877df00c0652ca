//! Domain error types and their classification.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Message returned to clients in place of internal failure details
pub const GENERIC_INTERNAL_MESSAGE: &str = "Something went wrong";

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or malformed input; `errors` carries per-field details
    #[error("{message}")]
    Validation { message: String, errors: Vec<String> },

    /// Unique username or email already taken
    #[error("{message}")]
    Conflict { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Coarse error classes the transport maps to status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Auth,
    NotFound,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Validation | ErrorKind::Conflict => 400,
            ErrorKind::Auth => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn invalid_fields(message: impl Into<String>, errors: Vec<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
            errors,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::Validation,
            DomainError::Conflict { .. } => ErrorKind::Conflict,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Internal { .. } => ErrorKind::Internal,
            DomainError::Auth(_) => ErrorKind::Auth,
            DomainError::Token(TokenError::GenerationFailed { .. }) => ErrorKind::Internal,
            DomainError::Token(_) => ErrorKind::Auth,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Message safe to show a client. Internal details never leave the process.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => GENERIC_INTERNAL_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }

    /// Field level details for the failure envelope
    pub fn details(&self) -> &[String] {
        match self {
            DomainError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
#[path = "tests/domain_error_tests.rs"]
mod tests;
