//! MySQL repository implementations

mod account_repository_impl;
mod channel_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use channel_repository_impl::MySqlChannelRepository;

use sqlx::mysql::MySqlDatabaseError;
use uuid::Uuid;
use vt_core::errors::DomainError;

/// MySQL `ER_DUP_ENTRY`
const DUPLICATE_KEY: u16 = 1062;

/// Map a driver error to the domain, turning unique key violations into
/// conflicts
pub(crate) fn map_write_error(err: sqlx::Error, context: &str) -> DomainError {
    if is_duplicate_key(&err) {
        return DomainError::conflict("User with email or username already exists");
    }
    DomainError::internal(format!("{}: {}", context, err))
}

pub(crate) fn is_duplicate_key(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db
            .try_downcast_ref::<MySqlDatabaseError>()
            .map(|e| e.number() == DUPLICATE_KEY)
            .unwrap_or(false),
        _ => false,
    }
}

pub(crate) fn internal(context: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e| DomainError::internal(format!("{}: {}", context, e))
}

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))
}
