//! Media storage collaborator

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMedia {
    /// Public URL of the stored file
    pub url: String,
}

/// Black-box media storage.
///
/// `upload` takes a file already staged on local disk and returns its public
/// URL, or `None` on any failure. Callers treat `None` as fatal for the
/// operation that needed the upload.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, local_path: &Path) -> Option<UploadedMedia>;
}
