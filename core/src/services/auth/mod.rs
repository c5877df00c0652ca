//! Authentication service module
//!
//! - Account registration with avatar / cover image upload
//! - Login by username or email
//! - Refresh token rotation (single active session per account)
//! - Logout and password change

mod input;
mod service;

#[cfg(test)]
mod tests;

pub use input::{ChangePasswordInput, LoginInput, RegisterInput};
pub use service::AuthService;
