use actix_web::{web, HttpResponse};
use vt_core::repositories::ChannelRepository;
use vt_core::services::MediaStore;
use vt_shared::ApiResponse;

use crate::app::{AccountStore, AppState};
use crate::dto::SubscriptionRequest;
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

/// GET /api/v1/users/c/{username}
pub async fn channel_profile<A, C, M>(
    state: web::Data<AppState<A, C, M>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let profile = state
        .account_service
        .channel_profile(&path, Some(auth.account_id))
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(profile, "User channel fetched successfully")))
}

/// POST /api/v1/users/c/{username}/subscription
pub async fn set_subscription<A, C, M>(
    state: web::Data<AppState<A, C, M>>,
    auth: AuthContext,
    path: web::Path<String>,
    body: web::Json<SubscriptionRequest>,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let profile = state
        .account_service
        .set_subscription(auth.account_id, &path, body.subscribed)
        .await?;
    let message = if body.subscribed {
        "Subscribed successfully"
    } else {
        "Unsubscribed successfully"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(profile, message)))
}

/// GET /api/v1/users/history
pub async fn watch_history<A, C, M>(
    state: web::Data<AppState<A, C, M>>,
    auth: AuthContext,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let history = state.account_service.watch_history(auth.account_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(history, "Watch history fetched successfully")))
}
