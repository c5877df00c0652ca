//! Account entity representing a registered user of the platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account as persisted by the account store.
///
/// Deliberately not `Serialize`: the password hash and the current refresh
/// token must never reach a client. Use [`Account::view`] for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique identifier, assigned at creation
    pub id: Uuid,

    /// Lowercased, unique
    pub username: String,

    /// Lowercased, unique
    pub email: String,

    /// Display name
    pub full_name: String,

    /// Public URL of the avatar image
    pub avatar_url: String,

    /// Public URL of the channel cover image
    pub cover_image_url: Option<String>,

    /// bcrypt hash of the password
    pub password_hash: String,

    /// The single refresh token currently honored for this account
    pub refresh_token: Option<String>,

    /// Watched video ids, oldest first
    pub watch_history: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Builds a fresh account from validated creation fields
    pub fn new(fields: NewAccount) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: normalize_username(&fields.username),
            email: normalize_email(&fields.email),
            full_name: fields.full_name.trim().to_string(),
            avatar_url: fields.avatar_url,
            cover_image_url: fields.cover_image_url,
            password_hash: fields.password_hash,
            refresh_token: None,
            watch_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the non-empty fields of `update` and bumps `updated_at`
    pub fn apply(&mut self, update: AccountUpdate) {
        if let Some(full_name) = update.full_name {
            self.full_name = full_name.trim().to_string();
        }
        if let Some(email) = update.email {
            self.email = normalize_email(&email);
        }
        if let Some(avatar_url) = update.avatar_url {
            self.avatar_url = avatar_url;
        }
        if let Some(cover_image_url) = update.cover_image_url {
            self.cover_image_url = Some(cover_image_url);
        }
        if let Some(password_hash) = update.password_hash {
            self.password_hash = password_hash;
        }
        self.updated_at = Utc::now();
    }

    /// Sanitized projection safe to return to clients
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            avatar_url: self.avatar_url.clone(),
            cover_image_url: self.cover_image_url.clone(),
            watch_history: self.watch_history.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fields required to create an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub password_hash: String,
}

/// Partial update; `None` leaves the field untouched.
///
/// The refresh token is not part of this struct: it is only written through
/// the session registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub password_hash: Option<String>,
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.avatar_url.is_none()
            && self.cover_image_url.is_none()
            && self.password_hash.is_none()
    }
}

/// Client-facing account representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub watch_history: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Usernames are compared case-insensitively
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
