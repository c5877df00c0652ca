//! Shared setup for the API integration tests: the real app over the
//! in-memory store and media backends.

#![allow(dead_code, unused_macros)]

use actix_web::{test::TestRequest, web};
use serde_json::{json, Value};
use std::sync::Arc;

use vt_api::AppState;
use vt_core::services::{BcryptPasswordHasher, TokenIssuer, TokenIssuerConfig};
use vt_infra::{InMemoryMediaStore, InMemoryStore};
use vt_shared::config::CookieConfig;

pub type TestState = AppState<InMemoryStore, InMemoryStore, InMemoryMediaStore>;

pub const PASSWORD: &str = "secret123";
pub const MAX_PAYLOAD: usize = 16 * 1024;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub store: Arc<InMemoryStore>,
    pub media: Arc<InMemoryMediaStore>,
    pub tokens: Arc<TokenIssuer>,
}

pub fn token_config() -> TokenIssuerConfig {
    TokenIssuerConfig {
        access_secret: "test-access-secret".to_string(),
        access_ttl: 900,
        refresh_secret: "test-refresh-secret".to_string(),
        refresh_ttl: 864_000,
        issuer: "vidtube-test".to_string(),
    }
}

pub fn context() -> TestContext {
    let store = Arc::new(InMemoryStore::new());
    let media = Arc::new(InMemoryMediaStore::new("https://media.test"));
    let tokens = Arc::new(TokenIssuer::new(token_config()));
    let state = web::Data::new(AppState::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&media),
        Arc::new(BcryptPasswordHasher::new(4)),
        Arc::clone(&tokens),
        CookieConfig::default(),
    ));
    TestContext {
        state,
        store,
        media,
        tokens,
    }
}

/// Initialise the full application for a [`TestContext`]
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(vt_api::create_app(
            $ctx.state.clone(),
            &vt_shared::config::CorsConfig::development(),
            $crate::common::MAX_PAYLOAD,
        ))
        .await
    };
}

/// Call the app and return the status and JSON body, rendering errors that
/// middleware returns as `Err` the same way the server writes them
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        match actix_web::test::try_call_service(&$app, $req).await {
            Ok(resp) => {
                let status = resp.status();
                let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
                (status, body)
            }
            Err(err) => {
                let resp = err.error_response();
                let status = resp.status();
                let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
                let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
                (status, body)
            }
        }
    }};
}

pub fn register_body(username: &str) -> Value {
    json!({
        "fullName": format!("{} Example", username),
        "email": format!("{}@x.com", username),
        "username": username,
        "password": PASSWORD,
        "avatarPath": format!("/tmp/uploads/{}-avatar.png", username),
    })
}

pub fn register_request(username: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(register_body(username))
}

pub fn login_request(username: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({ "username": username, "password": password }))
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
