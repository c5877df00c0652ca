//! In-memory media store for development and tests

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

use vt_core::services::media::{MediaStore, UploadedMedia};

/// Hands out URLs under `base_url` without storing any bytes.
///
/// The staged file is left on disk. `set_failing(true)` makes every upload
/// return `None`.
pub struct InMemoryMediaStore {
    base_url: String,
    failing: AtomicBool,
    uploads: Mutex<Vec<PathBuf>>,
}

impl InMemoryMediaStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            failing: AtomicBool::new(false),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Paths uploaded so far, in order
    pub async fn uploads(&self) -> Vec<PathBuf> {
        self.uploads.lock().await.clone()
    }
}

impl Default for InMemoryMediaStore {
    fn default() -> Self {
        Self::new("http://localhost:8000/media")
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload(&self, local_path: &Path) -> Option<UploadedMedia> {
        if self.failing.load(Ordering::SeqCst) {
            tracing::warn!(path = %local_path.display(), "Upload refused: store set to fail");
            return None;
        }
        let name = local_path.file_name()?.to_string_lossy().into_owned();
        self.uploads.lock().await.push(local_path.to_path_buf());
        Some(UploadedMedia {
            url: format!(
                "{}/{}-{}",
                self.base_url.trim_end_matches('/'),
                Uuid::new_v4().simple(),
                name
            ),
        })
    }
}
