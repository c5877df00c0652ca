//! JWT issuing and verification

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{AccessClaims, Account, RefreshClaims};
use crate::domain::value_objects::TokenPair;
use crate::errors::TokenError;

use super::config::TokenIssuerConfig;

/// Claim sets the issuer knows how to check
trait VerifiableClaims: DeserializeOwned {
    fn expires_at(&self) -> i64;
    fn subject(&self) -> Option<Uuid>;
}

impl VerifiableClaims for AccessClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }

    fn subject(&self) -> Option<Uuid> {
        self.account_id()
    }
}

impl VerifiableClaims for RefreshClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }

    fn subject(&self) -> Option<Uuid> {
        self.account_id()
    }
}

/// Signs and verifies access and refresh tokens (HS256).
///
/// Access and refresh tokens use different secrets, so neither verifies as
/// the other. Verification distinguishes an expired token
/// ([`TokenError::Expired`], signature valid) from everything else
/// ([`TokenError::Invalid`]): the signature is always checked before expiry,
/// so a tampered token is never reported as merely expired.
pub struct TokenIssuer {
    config: TokenIssuerConfig,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(config: TokenIssuerConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        // Expiry is checked against the caller's clock after the signature
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
            config,
        }
    }

    pub fn config(&self) -> &TokenIssuerConfig {
        &self.config
    }

    /// Access token for `account`, valid for `access_ttl` seconds
    pub fn issue_access(&self, account: &Account) -> Result<String, TokenError> {
        self.issue_access_at(account, Utc::now().timestamp())
    }

    /// Same as [`issue_access`](Self::issue_access) with an explicit issue time
    pub fn issue_access_at(&self, account: &Account, now: i64) -> Result<String, TokenError> {
        let claims = AccessClaims::new(account, &self.config.issuer, now, self.config.access_ttl);
        sign(&claims, &self.access_encoding)
    }

    /// Refresh token for `account_id`, valid for `refresh_ttl` seconds
    pub fn issue_refresh(&self, account_id: Uuid) -> Result<String, TokenError> {
        self.issue_refresh_at(account_id, Utc::now().timestamp())
    }

    pub fn issue_refresh_at(&self, account_id: Uuid, now: i64) -> Result<String, TokenError> {
        let claims = RefreshClaims::new(account_id, &self.config.issuer, now, self.config.refresh_ttl);
        sign(&claims, &self.refresh_encoding)
    }

    /// Mint an access/refresh pair
    pub fn issue_pair(&self, account: &Account) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access(account)?,
            refresh_token: self.issue_refresh(account.id)?,
        })
    }

    /// Verify an access token and return its account id
    pub fn verify_access(&self, token: &str) -> Result<Uuid, TokenError> {
        self.verify_access_at(token, Utc::now().timestamp())
    }

    pub fn verify_access_at(&self, token: &str, now: i64) -> Result<Uuid, TokenError> {
        let claims = self.decode_access_at(token, now)?;
        claims.account_id().ok_or(TokenError::Invalid)
    }

    /// Verify an access token and return all of its claims
    pub fn decode_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decode_access_at(token, Utc::now().timestamp())
    }

    pub fn decode_access_at(&self, token: &str, now: i64) -> Result<AccessClaims, TokenError> {
        self.verify_claims(token, &self.access_decoding, now)
    }

    /// Verify a refresh token's signature and expiry and return its account id.
    ///
    /// This does not consult the session registry; a valid signature alone
    /// does not make a refresh token usable.
    pub fn verify_refresh(&self, token: &str) -> Result<Uuid, TokenError> {
        self.verify_refresh_at(token, Utc::now().timestamp())
    }

    pub fn verify_refresh_at(&self, token: &str, now: i64) -> Result<Uuid, TokenError> {
        let claims: RefreshClaims = self.verify_claims(token, &self.refresh_decoding, now)?;
        claims.subject().ok_or(TokenError::Invalid)
    }

    fn verify_claims<C: VerifiableClaims>(
        &self,
        token: &str,
        key: &DecodingKey,
        now: i64,
    ) -> Result<C, TokenError> {
        let data = decode::<C>(token, key, &self.validation).map_err(|e| match e.kind() {
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })?;

        let claims = data.claims;
        if claims.subject().is_none() {
            return Err(TokenError::Invalid);
        }
        if now >= claims.expires_at() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

fn sign<C: Serialize>(claims: &C, key: &EncodingKey) -> Result<String, TokenError> {
    encode(&Header::new(Algorithm::HS256), claims, key).map_err(|e| TokenError::GenerationFailed {
        message: e.to_string(),
    })
}
