//! # VidTube API
//!
//! actix-web transport for the VidTube backend: the `/api/v1/users` routes,
//! JWT cookie authentication and the JSON response envelope.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AccountStore, AppState};
