use actix_web::{web, HttpResponse};
use vt_core::repositories::ChannelRepository;
use vt_core::services::MediaStore;
use vt_shared::ApiResponse;

use crate::app::{AccountStore, AppState};
use crate::dto::{validate_request, AvatarRequest, CoverImageRequest, UpdateAccountRequest};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

/// GET /api/v1/users/current-user
pub async fn current_user<A, C, M>(
    state: web::Data<AppState<A, C, M>>,
    auth: AuthContext,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let user = state.account_service.current_account(auth.account_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user, "Current user fetched successfully")))
}

/// PATCH /api/v1/users/update-account
pub async fn update_account<A, C, M>(
    state: web::Data<AppState<A, C, M>>,
    auth: AuthContext,
    body: web::Json<UpdateAccountRequest>,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let body = body.into_inner();
    validate_request(&body)?;

    let user = state
        .account_service
        .update_account_details(auth.account_id, body.into())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user, "Account details updated successfully")))
}

/// PATCH /api/v1/users/avatar
pub async fn update_avatar<A, C, M>(
    state: web::Data<AppState<A, C, M>>,
    auth: AuthContext,
    body: web::Json<AvatarRequest>,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let user = state
        .account_service
        .update_avatar(auth.account_id, body.avatar_path.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user, "Avatar updated successfully")))
}

/// PATCH /api/v1/users/cover-image
pub async fn update_cover_image<A, C, M>(
    state: web::Data<AppState<A, C, M>>,
    auth: AuthContext,
    body: web::Json<CoverImageRequest>,
) -> ApiResult
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let user = state
        .account_service
        .update_cover_image(auth.account_id, body.cover_image_path.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user, "Cover image updated successfully")))
}
