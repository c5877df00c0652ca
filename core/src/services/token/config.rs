//! Configuration for the token issuer

use vt_shared::config::JwtConfig;

/// Secrets and lifetimes for the two token kinds
#[derive(Debug, Clone)]
pub struct TokenIssuerConfig {
    pub access_secret: String,
    /// Access token lifetime in seconds
    pub access_ttl: i64,
    pub refresh_secret: String,
    /// Refresh token lifetime in seconds
    pub refresh_ttl: i64,
    /// `iss` claim written into and required from every token
    pub issuer: String,
}

impl Default for TokenIssuerConfig {
    fn default() -> Self {
        JwtConfig::default().into()
    }
}

impl From<JwtConfig> for TokenIssuerConfig {
    fn from(jwt: JwtConfig) -> Self {
        Self {
            access_secret: jwt.access_secret,
            access_ttl: jwt.access_token_expiry,
            refresh_secret: jwt.refresh_secret,
            refresh_ttl: jwt.refresh_token_expiry,
            issuer: jwt.issuer,
        }
    }
}

impl From<&JwtConfig> for TokenIssuerConfig {
    fn from(jwt: &JwtConfig) -> Self {
        jwt.clone().into()
    }
}
