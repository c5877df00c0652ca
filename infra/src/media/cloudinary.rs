//! Cloudinary unsigned uploads.
//!
//! The staged local file is read, posted as multipart form data to
//! `{api_base_url}/{cloud_name}/auto/upload` with the configured unsigned
//! preset, then removed from disk whatever the outcome.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, warn};

use vt_core::services::media::{MediaStore, UploadedMedia};
use vt_shared::config::MediaConfig;

use crate::InfrastructureError;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

impl CloudinaryMediaStore {
    pub fn new(config: &MediaConfig) -> Result<Self, InfrastructureError> {
        if config.cloud_name.is_empty() || config.upload_preset.is_empty() {
            return Err(InfrastructureError::Config(
                "Cloudinary cloud name and upload preset are required".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upload_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            upload_url: config.upload_url(),
            upload_preset: config.upload_preset.clone(),
        })
    }

    async fn send(&self, local_path: &Path) -> Result<String, InfrastructureError> {
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|e| InfrastructureError::General(format!("Cannot read staged file: {}", e)))?;
        let file_name = local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part("file", Part::bytes(bytes).file_name(file_name));

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: UploadResponse = response.json().await?;
        body.secure_url.or(body.url).ok_or_else(|| {
            InfrastructureError::General("Upload response carried no URL".to_string())
        })
    }
}

#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, local_path: &Path) -> Option<UploadedMedia> {
        let result = self.send(local_path).await;

        if let Err(e) = tokio::fs::remove_file(local_path).await {
            warn!(path = %local_path.display(), error = %e, "Failed to remove staged file");
        }

        match result {
            Ok(url) => {
                debug!(path = %local_path.display(), "Media uploaded");
                Some(UploadedMedia { url })
            }
            Err(e) => {
                error!(path = %local_path.display(), error = %e, "Media upload failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vt_shared::config::MediaBackend;

    fn config() -> MediaConfig {
        MediaConfig {
            backend: MediaBackend::Cloudinary,
            cloud_name: "demo".to_string(),
            upload_preset: "unsigned".to_string(),
            // Nothing listens here; requests fail fast
            api_base_url: "http://127.0.0.1:9".to_string(),
            upload_timeout_secs: 2,
        }
    }

    #[test]
    fn test_requires_credentials() {
        let result = CloudinaryMediaStore::new(&MediaConfig::default());
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[tokio::test]
    async fn test_missing_file_yields_none() {
        let store = CloudinaryMediaStore::new(&config()).unwrap();
        let path = std::env::temp_dir().join(format!("vt-missing-{}.png", uuid::Uuid::new_v4()));
        assert!(store.upload(&path).await.is_none());
    }

    #[tokio::test]
    async fn test_failed_upload_removes_staged_file() {
        let store = CloudinaryMediaStore::new(&config()).unwrap();
        let path = std::env::temp_dir().join(format!("vt-staged-{}.png", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, b"not really a png").await.unwrap();

        assert!(store.upload(&path).await.is_none());
        assert!(!path.exists());
    }
}
