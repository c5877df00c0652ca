//! CORS middleware configuration for cross-origin requests.
//!
//! Browser clients send the session cookies cross-origin, so credentials are
//! allowed whenever the origin list is explicit. A `*` entry (the development
//! default) allows any origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use vt_shared::config::CorsConfig;

pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("CORS: allowing any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }
    cors
}
