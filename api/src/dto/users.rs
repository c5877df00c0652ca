//! Bodies of the `/api/v1/users` endpoints. Field names are camelCase on the
//! wire.
//!
//! Required fields are `#[serde(default)]` so an absent field reaches the
//! service as empty and is reported per field rather than as a JSON error.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;
use vt_core::services::{ChangePasswordInput, LoginInput, RegisterInput, UpdateDetailsInput};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[validate(length(max = 255))]
    pub full_name: String,
    #[validate(length(max = 255))]
    pub email: String,
    #[validate(length(max = 64))]
    pub username: String,
    #[validate(length(max = 128))]
    pub password: String,
    /// Local path of the staged avatar upload
    pub avatar_path: Option<PathBuf>,
    pub cover_image_path: Option<PathBuf>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        RegisterInput {
            full_name: req.full_name,
            email: req.email,
            username: req.username,
            password: req.password,
            avatar_path: req.avatar_path,
            cover_image_path: req.cover_image_path,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    #[validate(length(max = 128))]
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        LoginInput {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

/// Optional body of `/refresh-token`; the cookie takes precedence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    #[validate(length(max = 128))]
    pub new_password: String,
}

impl From<ChangePasswordRequest> for ChangePasswordInput {
    fn from(req: ChangePasswordRequest) -> Self {
        ChangePasswordInput {
            old_password: req.old_password,
            new_password: req.new_password,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAccountRequest {
    #[validate(length(max = 255))]
    pub full_name: String,
    #[validate(length(max = 255))]
    pub email: String,
}

impl From<UpdateAccountRequest> for UpdateDetailsInput {
    fn from(req: UpdateAccountRequest) -> Self {
        UpdateDetailsInput {
            full_name: req.full_name,
            email: req.email,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvatarRequest {
    pub avatar_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverImageRequest {
    pub cover_image_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    pub subscribed: bool,
}
