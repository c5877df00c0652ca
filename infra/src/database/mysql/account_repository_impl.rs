//! MySQL implementation of the AccountRepository and SessionRegistry traits.
//!
//! The refresh token lives in the `accounts.refresh_token` column, so one
//! struct serves both traits. `rotate` is a single conditional `UPDATE`; the
//! comparison and the write happen inside MySQL under the row lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, QueryBuilder, Row};
use tracing::debug;
use uuid::Uuid;

use vt_core::domain::entities::{normalize_email, Account, AccountUpdate, NewAccount};
use vt_core::errors::DomainError;
use vt_core::repositories::{AccountRepository, SessionRegistry};

use super::{internal, map_write_error, parse_uuid};

const ACCOUNT_COLUMNS: &str = "id, username, email, full_name, avatar_url, cover_image_url, \
     password_hash, refresh_token, created_at, updated_at";

/// MySQL implementation of AccountRepository and SessionRegistry
#[derive(Clone)]
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity. Watch history is loaded
    /// separately.
    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(internal("Failed to get id"))?;

        Ok(Account {
            id: parse_uuid(&id)?,
            username: row
                .try_get("username")
                .map_err(internal("Failed to get username"))?,
            email: row.try_get("email").map_err(internal("Failed to get email"))?,
            full_name: row
                .try_get("full_name")
                .map_err(internal("Failed to get full_name"))?,
            avatar_url: row
                .try_get("avatar_url")
                .map_err(internal("Failed to get avatar_url"))?,
            cover_image_url: row
                .try_get("cover_image_url")
                .map_err(internal("Failed to get cover_image_url"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(internal("Failed to get password_hash"))?,
            refresh_token: row
                .try_get("refresh_token")
                .map_err(internal("Failed to get refresh_token"))?,
            watch_history: Vec::new(),
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(internal("Failed to get created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(internal("Failed to get updated_at"))?,
        })
    }

    async fn load_watch_history(&self, account: &mut Account) -> Result<(), DomainError> {
        let rows = sqlx::query(
            "SELECT video_id FROM watch_history WHERE account_id = ? ORDER BY position",
        )
        .bind(account.id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(internal("Failed to load watch history"))?;

        account.watch_history = rows
            .iter()
            .map(|row| {
                let id: String = row
                    .try_get("video_id")
                    .map_err(internal("Failed to get video_id"))?;
                parse_uuid(&id)
            })
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        binds: &[Option<&str>],
    ) -> Result<Option<Account>, DomainError> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE {} LIMIT 1",
            ACCOUNT_COLUMNS, clause
        );
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = query.bind(*value);
        }
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("Failed to find account"))?;

        match row {
            Some(row) => {
                let mut account = Self::row_to_account(&row)?;
                self.load_watch_history(&mut account).await?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email_or_username(
        &self,
        email: Option<&str>,
        username: Option<&str>,
    ) -> Result<Option<Account>, DomainError> {
        if email.is_none() && username.is_none() {
            return Ok(None);
        }
        self.fetch_one_where("email = ? OR username = ?", &[email, username])
            .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let id = id.to_string();
        self.fetch_one_where("id = ?", &[Some(id.as_str())]).await
    }

    async fn create(&self, account: NewAccount) -> Result<Account, DomainError> {
        let account = Account::new(account);

        let query = r#"
            INSERT INTO accounts (
                id, username, email, full_name, avatar_url, cover_image_url,
                password_hash, refresh_token, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.full_name)
            .bind(&account.avatar_url)
            .bind(&account.cover_image_url)
            .bind(&account.password_hash)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to create account"))?;

        debug!(account_id = %account.id, "Account row inserted");
        Ok(account)
    }

    /// Writes only the columns set in `update`, so concurrent updates of
    /// different fields do not overwrite each other.
    async fn update_fields(&self, id: Uuid, update: AccountUpdate) -> Result<Account, DomainError> {
        let mut query = QueryBuilder::<MySql>::new("UPDATE accounts SET updated_at = ");
        query.push_bind(Utc::now());
        if let Some(full_name) = update.full_name {
            query.push(", full_name = ").push_bind(full_name.trim().to_string());
        }
        if let Some(email) = update.email {
            query.push(", email = ").push_bind(normalize_email(&email));
        }
        if let Some(avatar_url) = update.avatar_url {
            query.push(", avatar_url = ").push_bind(avatar_url);
        }
        if let Some(cover_image_url) = update.cover_image_url {
            query.push(", cover_image_url = ").push_bind(cover_image_url);
        }
        if let Some(password_hash) = update.password_hash {
            query.push(", password_hash = ").push_bind(password_hash);
        }
        query.push(" WHERE id = ").push_bind(id.to_string());

        query
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to update account"))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }
}

#[async_trait]
impl SessionRegistry for MySqlAccountRepository {
    async fn set_refresh_token(&self, account_id: Uuid, token: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE accounts SET refresh_token = ?, updated_at = ? WHERE id = ?")
            .bind(token)
            .bind(Utc::now())
            .bind(account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(internal("Failed to store refresh token"))?;
        Ok(())
    }

    async fn rotate(
        &self,
        account_id: Uuid,
        presented: &str,
        new_token: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE accounts SET refresh_token = ?, updated_at = ? \
             WHERE id = ? AND refresh_token = ?",
        )
        .bind(new_token)
        .bind(Utc::now())
        .bind(account_id.to_string())
        .bind(presented)
        .execute(&self.pool)
        .await
        .map_err(internal("Failed to rotate refresh token"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn clear(&self, account_id: Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE accounts SET refresh_token = NULL WHERE id = ?")
            .bind(account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(internal("Failed to clear refresh token"))?;
        Ok(())
    }

    async fn get(&self, account_id: Uuid) -> Result<Option<String>, DomainError> {
        let row = sqlx::query("SELECT refresh_token FROM accounts WHERE id = ?")
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("Failed to read refresh token"))?;

        match row {
            Some(row) => row
                .try_get::<Option<String>, _>("refresh_token")
                .map_err(internal("Failed to get refresh_token")),
            None => Ok(None),
        }
    }
}
