//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Account, AccountUpdate, NewAccount};
use crate::errors::DomainError;

use super::r#trait::AccountRepository;

/// Mock account repository for testing
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    fail_writes: AtomicBool,
    create_calls: AtomicUsize,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: AtomicBool::new(false),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// Make `create` and `update_fields` fail with an internal error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock write failure"));
        }
        Ok(())
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email_or_username(
        &self,
        email: Option<&str>,
        username: Option<&str>,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| email == Some(a.email.as_str()) || username == Some(a.username.as_str()))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn create(&self, fields: NewAccount) -> Result<Account, DomainError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;

        let account = Account::new(fields);
        let mut accounts = self.accounts.write().await;
        if accounts
            .values()
            .any(|a| a.username == account.username || a.email == account.email)
        {
            return Err(DomainError::conflict("User with email or username already exists"));
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_fields(&self, id: Uuid, update: AccountUpdate) -> Result<Account, DomainError> {
        self.check_writable()?;

        let mut accounts = self.accounts.write().await;
        if let Some(email) = update.email.as_deref() {
            if accounts.values().any(|a| a.id != id && a.email == email) {
                return Err(DomainError::conflict("Email is already in use"));
            }
        }
        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("User"))?;
        account.apply(update);
        Ok(account.clone())
    }
}
