//! Error types for authentication and token handling
//!
//! The display strings are the messages shown to API clients.

use thiserror::Error;

/// Authentication failures. Every variant maps to HTTP 401.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid user credentials")]
    InvalidCredentials,

    #[error("Invalid old password")]
    InvalidOldPassword,

    #[error("Unauthorized request")]
    MissingToken,

    #[error("Invalid access token")]
    InvalidAccessToken,

    #[error("Access token expired")]
    AccessTokenExpired,

    #[error("Invalid refresh token")]
    RefreshTokenRejected,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    /// The presented refresh token is not the one currently stored for the
    /// account: it was rotated away, replaced by a newer login, or cleared.
    #[error("Refresh token is expired or used")]
    SessionSuperseded,
}

/// Token issuing and verification failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed token, wrong issuer or unusable claims
    #[error("Invalid token")]
    Invalid,

    /// Signature checks out but the token is past its expiry
    #[error("Token expired")]
    Expired,

    #[error("Token generation failed: {message}")]
    GenerationFailed { message: String },
}
