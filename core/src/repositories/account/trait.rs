//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Account, AccountUpdate, NewAccount};
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
///
/// Implementations enforce uniqueness of `username` and `email` themselves:
/// a duplicate on `create` or `update_fields` surfaces as
/// [`DomainError::Conflict`], never as a raw driver error.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find the first account whose email equals `email` or whose username
    /// equals `username`. Either side may be omitted; both omitted yields
    /// `Ok(None)`. Callers pass already normalized (lowercased) values.
    async fn find_by_email_or_username(
        &self,
        email: Option<&str>,
        username: Option<&str>,
    ) -> Result<Option<Account>, DomainError>;

    /// Find an account by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Persist a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account, with id and timestamps assigned
    /// * `Err(DomainError::Conflict)` - Username or email already taken
    async fn create(&self, account: NewAccount) -> Result<Account, DomainError>;

    /// Apply a partial update and return the updated account
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No account with `id`
    /// * `Err(DomainError::Conflict)` - The new email belongs to another account
    async fn update_fields(&self, id: Uuid, update: AccountUpdate) -> Result<Account, DomainError>;
}
