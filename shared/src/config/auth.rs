//! Authentication and session cookie configuration

use serde::{Deserialize, Serialize};

use super::env_or;

pub(crate) const DEFAULT_ACCESS_SECRET: &str = "access-secret-change-in-production";
pub(crate) const DEFAULT_REFRESH_SECRET: &str = "refresh-secret-change-in-production";

/// JWT signing configuration.
///
/// Access and refresh tokens are signed with separate secrets so that a
/// refresh token can never be replayed as an access token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Secret used to sign refresh tokens
    pub refresh_secret: String,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_ACCESS_SECRET),
            access_token_expiry: 900,       // 15 minutes
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            refresh_token_expiry: 864_000,  // 10 days
            issuer: String::from("vidtube"),
        }
    }
}

impl JwtConfig {
    /// Create a configuration with explicit secrets and default lifetimes
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Check if either secret is still the built-in placeholder
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_secret: env_or("ACCESS_TOKEN_SECRET", defaults.access_secret),
            access_token_expiry: env_or("ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
            refresh_secret: env_or("REFRESH_TOKEN_SECRET", defaults.refresh_secret),
            refresh_token_expiry: env_or("REFRESH_TOKEN_EXPIRY", defaults.refresh_token_expiry),
            issuer: env_or("JWT_ISSUER", defaults.issuer),
        }
    }
}

/// Attributes of the `accessToken` / `refreshToken` cookies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// SameSite attribute: "Strict", "Lax" or "None"
    pub same_site: String,

    /// Cookie path
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: true,
            http_only: default_http_only(),
            same_site: String::from("Lax"),
            path: String::from("/"),
        }
    }
}

impl CookieConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secure: env_or("COOKIE_SECURE", defaults.secure),
            http_only: defaults.http_only,
            same_site: env_or("COOKIE_SAME_SITE", defaults.same_site),
            path: defaults.path,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub cookies: CookieConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            cookies: CookieConfig::from_env(),
        }
    }
}

fn default_http_only() -> bool {
    true
}
