//! Token issuer module for JWT management
//!
//! - Access token signing and verification (short lived, stateless)
//! - Refresh token signing and verification (long lived; usability is
//!   additionally gated by the session registry)

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenIssuerConfig;
pub use service::TokenIssuer;
