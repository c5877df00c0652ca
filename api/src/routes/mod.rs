//! HTTP route handlers

pub mod cookies;
pub mod health;
pub mod users;
