//! Request-shaped inputs accepted by the auth service

use std::path::PathBuf;

/// Registration fields plus the staged local paths of the uploaded images
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    /// Required; registration fails without a successfully uploaded avatar
    pub avatar_path: Option<PathBuf>,
    pub cover_image_path: Option<PathBuf>,
}

/// Login by username or email; either one is enough
#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

impl LoginInput {
    pub fn with_username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            email: None,
            password: password.into(),
        }
    }

    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: None,
            email: Some(email.into()),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}
