//! Mock media store for testing

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::traits::{MediaStore, UploadedMedia};

/// Records uploaded paths; can be told to fail every upload or only
/// uploads whose path contains a marker.
#[derive(Default)]
pub struct MockMediaStore {
    fail_all: AtomicBool,
    fail_marker: Mutex<Option<String>>,
    uploads: Mutex<Vec<PathBuf>>,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    pub fn fail_paths_containing(&self, marker: &str) {
        *self.fail_marker.lock().unwrap() = Some(marker.to_string());
    }

    pub fn uploads(&self) -> Vec<PathBuf> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload(&self, local_path: &Path) -> Option<UploadedMedia> {
        if self.fail_all.load(Ordering::SeqCst) {
            return None;
        }
        let marker = self.fail_marker.lock().unwrap().clone();
        if let Some(marker) = marker {
            if local_path.to_string_lossy().contains(&marker) {
                return None;
            }
        }
        self.uploads.lock().unwrap().push(local_path.to_path_buf());
        let name = local_path.file_name()?.to_string_lossy();
        Some(UploadedMedia {
            url: format!("https://media.test/{}", name),
        })
    }
}
