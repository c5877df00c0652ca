//! Server-side session state of an account.

use serde::{Deserialize, Serialize};

/// There is no server-side `Expired` state: expiry is decided when a token
/// is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// No refresh token stored
    LoggedOut,
    /// A refresh token is stored and will be honored once
    Active,
}

impl SessionState {
    pub fn from_stored(token: Option<&str>) -> Self {
        match token {
            Some(_) => SessionState::Active,
            None => SessionState::LoggedOut,
        }
    }
}
