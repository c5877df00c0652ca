//! Session registry trait: the server-side record of which refresh token is
//! currently honored for each account.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainError;

/// Single-slot refresh token storage per account.
///
/// `set_refresh_token` and `clear` are unconditional, last writer wins.
/// `rotate` must be linearizable per account: implementations perform the
/// comparison and the write as one atomic store operation (a conditional
/// update keyed on the previous value), never as a read followed by a write.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Unconditionally replace the stored token. Used on login.
    async fn set_refresh_token(&self, account_id: Uuid, token: &str) -> Result<(), DomainError>;

    /// Replace the stored token with `new_token` only if it currently equals
    /// `presented`.
    ///
    /// # Returns
    /// * `Ok(true)` - The swap happened
    /// * `Ok(false)` - The stored token differed (or was absent); nothing changed
    async fn rotate(
        &self,
        account_id: Uuid,
        presented: &str,
        new_token: &str,
    ) -> Result<bool, DomainError>;

    /// Remove the stored token. Idempotent.
    async fn clear(&self, account_id: Uuid) -> Result<(), DomainError>;

    /// Currently stored token, if any
    async fn get(&self, account_id: Uuid) -> Result<Option<String>, DomainError>;
}
