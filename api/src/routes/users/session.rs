use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;
use vt_core::repositories::ChannelRepository;
use vt_core::services::MediaStore;
use vt_shared::types::Empty;
use vt_shared::ApiResponse;

use crate::app::{AccountStore, AppState};
use crate::dto::{
    validate_request, ChangePasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;
use crate::routes::cookies::{cleared_cookies, session_cookies, REFRESH_TOKEN_COOKIE};

/// POST /api/v1/users/register
///
/// Creates the account and answers 201 with the sanitized user. No session
/// is opened; the client logs in afterwards.
pub async fn register<A, C, M>(
    state: web::Data<AppState<A, C, M>>,
    body: web::Json<RegisterRequest>,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let body = body.into_inner();
    validate_request(&body)?;

    let user = state.auth_service.register(body.into()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::created(user, "User registered successfully")))
}

/// POST /api/v1/users/login
///
/// Sets the `accessToken` / `refreshToken` cookies and also returns both
/// tokens in the body for clients without a cookie jar.
pub async fn login<A, C, M>(
    state: web::Data<AppState<A, C, M>>,
    body: web::Json<LoginRequest>,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let body = body.into_inner();
    validate_request(&body)?;

    let outcome = state.auth_service.login(body.into()).await?;

    let mut response = HttpResponse::Ok();
    for cookie in session_cookies(&state.cookies, &outcome.tokens()) {
        response.cookie(cookie);
    }
    Ok(response.json(ApiResponse::ok(outcome, "User logged in successfully")))
}

/// POST /api/v1/users/refresh-token
///
/// The refresh token comes from the cookie, or from `refreshToken` in the
/// body when no cookie is sent.
pub async fn refresh_token<A, C, M>(
    req: HttpRequest,
    state: web::Data<AppState<A, C, M>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let presented = req
        .cookie(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| body.and_then(|body| body.into_inner().refresh_token))
        .unwrap_or_default();

    let tokens = state.auth_service.refresh(&presented).await?;

    let mut response = HttpResponse::Ok();
    for cookie in session_cookies(&state.cookies, &tokens) {
        response.cookie(cookie);
    }
    Ok(response.json(ApiResponse::ok(tokens, "Access token refreshed")))
}

/// POST /api/v1/users/logout
///
/// Clears the stored refresh token and expires both cookies. Calling it
/// again is harmless.
pub async fn logout<A, C, M>(
    state: web::Data<AppState<A, C, M>>,
    auth: AuthContext,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    state.auth_service.logout(auth.account_id).await?;

    let mut response = HttpResponse::Ok();
    for cookie in cleared_cookies(&state.cookies) {
        response.cookie(cookie);
    }
    Ok(response.json(ApiResponse::ok(Empty {}, "User logged out")))
}

/// POST /api/v1/users/change-password
pub async fn change_password<A, C, M>(
    state: web::Data<AppState<A, C, M>>,
    auth: AuthContext,
    body: web::Json<ChangePasswordRequest>,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let body = body.into_inner();
    validate_request(&body)?;

    state
        .auth_service
        .change_password(auth.account_id, body.into())
        .await?;

    info!(account_id = %auth.account_id, "Password change completed");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(Empty {}, "Password changed successfully")))
}
