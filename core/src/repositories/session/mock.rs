//! Mock implementation of SessionRegistry for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::DomainError;

use super::r#trait::SessionRegistry;

/// In-process registry; `rotate` compares and swaps under one lock
#[derive(Default)]
pub struct MockSessionRegistry {
    tokens: Mutex<HashMap<Uuid, String>>,
    rotations: AtomicUsize,
}

impl MockSessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `rotate` calls that swapped successfully
    pub fn successful_rotations(&self) -> usize {
        self.rotations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRegistry for MockSessionRegistry {
    async fn set_refresh_token(&self, account_id: Uuid, token: &str) -> Result<(), DomainError> {
        self.tokens.lock().await.insert(account_id, token.to_string());
        Ok(())
    }

    async fn rotate(
        &self,
        account_id: Uuid,
        presented: &str,
        new_token: &str,
    ) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.lock().await;
        match tokens.get_mut(&account_id) {
            Some(current) if current == presented => {
                *current = new_token.to_string();
                self.rotations.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn clear(&self, account_id: Uuid) -> Result<(), DomainError> {
        self.tokens.lock().await.remove(&account_id);
        Ok(())
    }

    async fn get(&self, account_id: Uuid) -> Result<Option<String>, DomainError> {
        Ok(self.tokens.lock().await.get(&account_id).cloned())
    }
}
