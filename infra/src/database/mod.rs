//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and schema bootstrap
//! - Repository implementations for accounts, sessions and channels

pub mod connection;
pub mod mysql;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlAccountRepository, MySqlChannelRepository};
