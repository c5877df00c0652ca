//! `accessToken` / `refreshToken` session cookies

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use vt_core::domain::value_objects::TokenPair;
use vt_shared::config::CookieConfig;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn same_site(config: &CookieConfig) -> SameSite {
    match config.same_site.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

fn build(config: &CookieConfig, name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(name, value)
        .path(config.path.clone())
        .secure(config.secure)
        .http_only(config.http_only)
        .same_site(same_site(config))
        .finish()
}

/// Both token cookies for a freshly issued pair
pub fn session_cookies(config: &CookieConfig, tokens: &TokenPair) -> [Cookie<'static>; 2] {
    [
        build(config, ACCESS_TOKEN_COOKIE, tokens.access_token.clone()),
        build(config, REFRESH_TOKEN_COOKIE, tokens.refresh_token.clone()),
    ]
}

/// Expired, empty cookies that make the browser drop the session
pub fn cleared_cookies(config: &CookieConfig) -> [Cookie<'static>; 2] {
    [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE].map(|name| {
        let mut cookie = build(config, name, String::new());
        cookie.set_max_age(Duration::seconds(0));
        cookie
    })
}
