//! JWT authentication middleware for protecting API endpoints.
//!
//! The access token is taken from the `accessToken` cookie, falling back to
//! an `Authorization: Bearer` header. A verified token puts an
//! [`AuthContext`] into the request extensions; handlers receive it as an
//! extractor.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;
use vt_core::domain::entities::AccessClaims;
use vt_core::errors::{AuthError, TokenError};
use vt_core::services::token::TokenIssuer;

use crate::handlers::ApiError;
use crate::routes::cookies::ACCESS_TOKEN_COOKIE;

/// Authenticated caller, injected by [`JwtAuth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub account_id: Uuid,
    pub username: String,
    pub email: String,
}

impl AuthContext {
    pub fn from_claims(claims: &AccessClaims) -> Result<Self, AuthError> {
        let account_id = claims.account_id().ok_or(AuthError::InvalidAccessToken)?;
        Ok(Self {
            account_id,
            username: claims.username.clone(),
            email: claims.email.clone(),
        })
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    issuer: Arc<TokenIssuer>,
}

impl JwtAuth {
    pub fn new(issuer: Arc<TokenIssuer>) -> Self {
        Self { issuer }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            issuer: Arc::clone(&self.issuer),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    issuer: Arc<TokenIssuer>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let issuer = Arc::clone(&self.issuer);

        Box::pin(async move {
            let context = authenticate(&issuer, extract_access_token(&req).as_deref())
                .map_err(|e| {
                    tracing::debug!(error = %e, path = req.path(), "Access token rejected");
                    Error::from(ApiError::from(e))
                })?;

            req.extensions_mut().insert(context);
            service.call(req).await
        })
    }
}

/// Verify a presented access token. Expiry is reported separately from any
/// other defect.
pub fn authenticate(issuer: &TokenIssuer, token: Option<&str>) -> Result<AuthContext, AuthError> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = issuer.decode_access(token).map_err(|e| match e {
        TokenError::Expired => AuthError::AccessTokenExpired,
        _ => AuthError::InvalidAccessToken,
    })?;
    AuthContext::from_claims(&claims)
}

/// Cookie first, then `Authorization: Bearer`
fn extract_access_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(ACCESS_TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(AuthError::MissingToken).into());

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vt_core::domain::entities::{Account, NewAccount};
    use vt_core::services::token::TokenIssuerConfig;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(TokenIssuerConfig::default())
    }

    fn account() -> Account {
        Account::new(NewAccount {
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            full_name: "Alice".to_string(),
            avatar_url: "https://media.test/a.png".to_string(),
            cover_image_url: None,
            password_hash: "hash".to_string(),
        })
    }

    #[test]
    fn test_authenticate_valid_token() {
        let issuer = issuer();
        let account = account();
        let token = issuer.issue_access(&account).unwrap();

        let context = authenticate(&issuer, Some(&token)).unwrap();
        assert_eq!(context.account_id, account.id);
        assert_eq!(context.username, "alice");
    }

    #[test]
    fn test_authenticate_failures() {
        let issuer = issuer();
        let account = account();
        let expired = issuer
            .issue_access_at(&account, Utc::now().timestamp() - 100_000)
            .unwrap();
        let refresh = issuer.issue_refresh(account.id).unwrap();

        assert_eq!(authenticate(&issuer, None), Err(AuthError::MissingToken));
        assert_eq!(authenticate(&issuer, Some("  ")), Err(AuthError::MissingToken));
        assert_eq!(
            authenticate(&issuer, Some(&expired)),
            Err(AuthError::AccessTokenExpired)
        );
        assert_eq!(
            authenticate(&issuer, Some(&refresh)),
            Err(AuthError::InvalidAccessToken)
        );
    }
}
