//! JWT claim sets for access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Account;

/// Claims of an access token. Carries enough identity to render a request
/// context without a store lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Account id
    pub sub: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique per token, so two tokens minted in the same second differ
    pub jti: String,
}

impl AccessClaims {
    pub fn new(account: &Account, issuer: &str, issued_at: i64, ttl_seconds: i64) -> Self {
        Self {
            sub: account.id.to_string(),
            email: account.email.clone(),
            username: account.username.clone(),
            full_name: account.full_name.clone(),
            iss: issuer.to_string(),
            iat: issued_at,
            exp: issued_at + ttl_seconds,
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn account_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Claims of a refresh token: identity only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl RefreshClaims {
    pub fn new(account_id: Uuid, issuer: &str, issued_at: i64, ttl_seconds: i64) -> Self {
        Self {
            sub: account_id.to_string(),
            iss: issuer.to_string(),
            iat: issued_at,
            exp: issued_at + ttl_seconds,
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn account_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}
