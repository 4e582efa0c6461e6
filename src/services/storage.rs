//! Blob uploads for section images.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// A local file the admin picked but has not uploaded yet.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("No file uploaded")]
    EmptyFile,
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// The hosted blob store. An upload returns the durable URL of the stored blob.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, file: StagedFile) -> Result<String, StorageError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredBlob {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Keeps uploaded blobs in memory under `<base_url>/<uuid>-<file name>`.
pub struct MemoryStorage {
    base_url: String,
    blobs: Mutex<HashMap<String, StoredBlob>>,
}

impl MemoryStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            blobs: Mutex::new(HashMap::new()),
        }
    }

    /// Looks a blob up by the URL `upload` returned.
    pub fn blob(&self, url: &str) -> Option<StoredBlob> {
        self.blobs.lock().ok()?.get(url).cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(&self, file: StagedFile) -> Result<String, StorageError> {
        if file.bytes.is_empty() {
            return Err(StorageError::EmptyFile);
        }
        let blob_name = format!("{}-{}", Uuid::new_v4(), file.file_name);
        let url = format!("{}/{}", self.base_url, blob_name);
        debug!(%blob_name, content_type = %file.content_type, size = file.bytes.len(), "Upload");

        self.blobs
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?
            .insert(
                url.clone(),
                StoredBlob {
                    content_type: file.content_type,
                    bytes: file.bytes,
                },
            );
        info!(%url, "Uploaded");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_names_blob_after_file() {
        let storage = MemoryStorage::new("https://blobs.example.com/uploads/");
        let url = storage
            .upload(StagedFile::new("cover.png", "image/png", vec![1, 2, 3]))
            .await
            .unwrap();

        assert!(url.starts_with("https://blobs.example.com/uploads/"));
        assert!(url.ends_with("-cover.png"));
        let blob = storage.blob(&url).unwrap();
        assert_eq!(blob.content_type, "image/png");
        assert_eq!(blob.bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected() {
        let storage = MemoryStorage::new("https://blobs.example.com");
        let result = storage
            .upload(StagedFile::new("empty.png", "image/png", Vec::new()))
            .await;
        assert!(matches!(result, Err(StorageError::EmptyFile)));
        assert!(storage.is_empty());
    }
}
