//! Media upload configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::env_or;

/// Where avatars and cover images are uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaBackend {
    /// Keeps uploads in process and hands out synthetic URLs
    Memory,
    /// Cloudinary unsigned uploads
    Cloudinary,
}

impl FromStr for MediaBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(MediaBackend::Memory),
            "cloudinary" => Ok(MediaBackend::Cloudinary),
            _ => Err(format!("Invalid media backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    pub backend: MediaBackend,

    /// Cloudinary cloud name
    pub cloud_name: String,

    /// Unsigned upload preset configured on the Cloudinary account
    pub upload_preset: String,

    /// Upload API base URL
    pub api_base_url: String,

    /// Upload request timeout in seconds
    pub upload_timeout_secs: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            backend: MediaBackend::Memory,
            cloud_name: String::new(),
            upload_preset: String::new(),
            api_base_url: String::from("https://api.cloudinary.com/v1_1"),
            upload_timeout_secs: 30,
        }
    }
}

impl MediaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env_or("MEDIA_BACKEND", defaults.backend),
            cloud_name: env_or("CLOUDINARY_CLOUD_NAME", defaults.cloud_name),
            upload_preset: env_or("CLOUDINARY_UPLOAD_PRESET", defaults.upload_preset),
            api_base_url: env_or("CLOUDINARY_API_BASE_URL", defaults.api_base_url),
            upload_timeout_secs: env_or("MEDIA_UPLOAD_TIMEOUT_SECS", defaults.upload_timeout_secs),
        }
    }

    /// Full upload endpoint for the configured cloud
    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}/auto/upload",
            self.api_base_url.trim_end_matches('/'),
            self.cloud_name
        )
    }
}
