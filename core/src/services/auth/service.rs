//! Main authentication service implementation

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vt_shared::validation::{validators, FieldErrors};

use crate::domain::entities::{
    normalize_email, normalize_username, Account, AccountUpdate, AccountView, NewAccount,
    SessionState,
};
use crate::domain::value_objects::{LoginOutcome, TokenPair};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{AccountRepository, SessionRegistry};
use crate::services::media::MediaStore;
use crate::services::password::{hash_password, verify_password, PasswordHasher};
use crate::services::token::TokenIssuer;

use super::input::{ChangePasswordInput, LoginInput, RegisterInput};

/// Authentication service: registration, login, refresh-token rotation,
/// logout and password change.
///
/// Session policy: one refresh token per account is honored at a time.
/// Login replaces it unconditionally, refresh swaps it with a compare-and-swap
/// on the registry, logout clears it.
pub struct AuthService<A, S, H, M>
where
    A: AccountRepository,
    S: SessionRegistry,
    H: PasswordHasher,
    M: MediaStore,
{
    /// Account persistence
    accounts: Arc<A>,
    /// Refresh token slot per account
    sessions: Arc<S>,
    hasher: Arc<H>,
    /// Avatar / cover image uploads
    media: Arc<M>,
    tokens: Arc<TokenIssuer>,
}

impl<A, S, H, M> AuthService<A, S, H, M>
where
    A: AccountRepository,
    S: SessionRegistry,
    H: PasswordHasher,
    M: MediaStore,
{
    pub fn new(
        accounts: Arc<A>,
        sessions: Arc<S>,
        hasher: Arc<H>,
        media: Arc<M>,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            accounts,
            sessions,
            hasher,
            media,
            tokens,
        }
    }

    /// Register a new account.
    ///
    /// Steps, each short-circuiting before any write:
    /// 1. All text fields non-empty after trimming, email well formed
    /// 2. An avatar file was supplied
    /// 3. Neither the email nor the (lowercased) username is taken
    /// 4. Password hashed, avatar and optional cover uploaded
    /// 5. Account created
    ///
    /// A failed upload aborts with an internal error and nothing is created.
    /// Images already uploaded when a later step fails are not cleaned up.
    pub async fn register(&self, input: RegisterInput) -> DomainResult<AccountView> {
        let mut missing = FieldErrors::new();
        missing.require("fullName", &input.full_name);
        missing.require("email", &input.email);
        missing.require("username", &input.username);
        missing.require("password", &input.password);
        if !missing.is_empty() {
            return Err(DomainError::invalid_fields(
                "All fields are required",
                missing.to_messages(),
            ));
        }
        if !validators::is_valid_email(&input.email) {
            return Err(DomainError::validation("Email is invalid"));
        }
        if !validators::is_valid_username(&input.username) {
            return Err(DomainError::validation(
                "Username may only contain letters, digits, '_', '.' and '-'",
            ));
        }
        let avatar_path = input
            .avatar_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| DomainError::validation("Avatar file is required"))?;

        let email = normalize_email(&input.email);
        let username = normalize_username(&input.username);
        if self
            .accounts
            .find_by_email_or_username(Some(&email), Some(&username))
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                "User with email or username already exists",
            ));
        }

        let password_hash = hash_password(&self.hasher, &input.password).await?;

        let avatar = self
            .media
            .upload(avatar_path)
            .await
            .ok_or_else(|| DomainError::internal("avatar upload failed"))?;
        let cover_image_url = match input.cover_image_path.as_deref() {
            Some(path) => Some(
                self.media
                    .upload(path)
                    .await
                    .ok_or_else(|| DomainError::internal("cover image upload failed"))?
                    .url,
            ),
            None => None,
        };

        let account = self
            .accounts
            .create(NewAccount {
                username,
                email,
                full_name: input.full_name.trim().to_string(),
                avatar_url: avatar.url,
                cover_image_url,
                password_hash,
            })
            .await?;

        info!(account_id = %account.id, username = %account.username, "Account registered");
        Ok(account.view())
    }

    /// Log in with username or email and password.
    ///
    /// On success the new refresh token replaces whatever was stored before,
    /// so any earlier session stops refreshing.
    pub async fn login(&self, input: LoginInput) -> DomainResult<LoginOutcome> {
        let email = non_blank(input.email.as_deref()).map(normalize_email);
        let username = non_blank(input.username.as_deref()).map(normalize_username);
        if email.is_none() && username.is_none() {
            return Err(DomainError::validation("Username or email is required"));
        }
        if input.password.is_empty() {
            return Err(DomainError::validation("Password is required"));
        }

        let account = self
            .accounts
            .find_by_email_or_username(email.as_deref(), username.as_deref())
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        if !verify_password(&self.hasher, &input.password, &account.password_hash).await? {
            warn!(account_id = %account.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.tokens.issue_pair(&account)?;
        self.sessions
            .set_refresh_token(account.id, &tokens.refresh_token)
            .await?;

        info!(account_id = %account.id, "Logged in");
        Ok(LoginOutcome::new(account.view(), tokens))
    }

    /// Exchange the current refresh token for a new pair.
    ///
    /// The presented token must verify and must still be the one stored for
    /// the account. The swap is a compare-and-swap, so of two concurrent
    /// refreshes with the same token exactly one succeeds; the loser's
    /// freshly minted pair is discarded.
    pub async fn refresh(&self, presented: &str) -> DomainResult<TokenPair> {
        let presented = presented.trim();
        if presented.is_empty() {
            return Err(AuthError::MissingToken.into());
        }

        let account_id = self
            .tokens
            .verify_refresh(presented)
            .map_err(|e| match e {
                TokenError::Expired => AuthError::RefreshTokenExpired,
                _ => AuthError::RefreshTokenRejected,
            })?;

        let account = self.find_account(account_id).await?;

        match self.sessions.get(account_id).await? {
            Some(current) if current == presented => {}
            _ => {
                warn!(account_id = %account_id, "Refresh rejected: token is not the current session");
                return Err(AuthError::SessionSuperseded.into());
            }
        }

        let tokens = self.tokens.issue_pair(&account)?;
        let rotated = self
            .sessions
            .rotate(account_id, presented, &tokens.refresh_token)
            .await?;
        if !rotated {
            warn!(account_id = %account_id, "Refresh rejected: lost rotation race");
            return Err(AuthError::SessionSuperseded.into());
        }

        debug!(account_id = %account_id, "Refresh token rotated");
        Ok(tokens)
    }

    /// End the account's session. Succeeds again when already logged out.
    pub async fn logout(&self, account_id: Uuid) -> DomainResult<()> {
        self.find_account(account_id).await?;
        self.sessions.clear(account_id).await?;
        info!(account_id = %account_id, "Logged out");
        Ok(())
    }

    /// Change the password after checking the old one.
    ///
    /// The stored refresh token is left in place: sessions opened before the
    /// change keep refreshing.
    pub async fn change_password(
        &self,
        account_id: Uuid,
        input: ChangePasswordInput,
    ) -> DomainResult<()> {
        let mut missing = FieldErrors::new();
        missing.require("oldPassword", &input.old_password);
        missing.require("newPassword", &input.new_password);
        if !missing.is_empty() {
            return Err(DomainError::invalid_fields(
                "Old and new password are required",
                missing.to_messages(),
            ));
        }

        let account = self.find_account(account_id).await?;
        if !verify_password(&self.hasher, &input.old_password, &account.password_hash).await? {
            warn!(account_id = %account_id, "Password change rejected: wrong old password");
            return Err(AuthError::InvalidOldPassword.into());
        }

        let password_hash = hash_password(&self.hasher, &input.new_password).await?;
        self.accounts
            .update_fields(
                account_id,
                AccountUpdate {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await?;

        info!(account_id = %account_id, "Password changed");
        Ok(())
    }

    /// Whether the account currently holds a refreshable session
    pub async fn session_state(&self, account_id: Uuid) -> DomainResult<SessionState> {
        let stored = self.sessions.get(account_id).await?;
        Ok(SessionState::from_stored(stored.as_deref()))
    }

    async fn find_account(&self, account_id: Uuid) -> DomainResult<Account> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
