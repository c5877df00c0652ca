//! Authentication results returned by the auth service.

use serde::{Deserialize, Serialize};

use crate::domain::entities::AccountView;

/// A freshly minted access/refresh pair. Never persisted as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    /// Sanitized account
    pub user: AccountView,
    pub access_token: String,
    pub refresh_token: String,
}

impl LoginOutcome {
    pub fn new(user: AccountView, tokens: TokenPair) -> Self {
        Self {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }

    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}
