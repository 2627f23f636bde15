// src/services/blob_store.rs
// DOCUMENTATION: Storage for raw uploaded image bytes
// PURPOSE: Keep blobs outside the database, addressed by photo filename

use crate::errors::PhotoError;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Blob storage backend
///
/// Keys are flat names (`{photo_id}_{original filename}`), never paths.
#[async_trait]
pub trait BlobBackend: Send + Sync {
    /// Store bytes under `key`, replacing any existing blob
    async fn put(&self, key: &str, data: &[u8]) -> Result<(), PhotoError>;

    /// Retrieve a blob, `None` if nothing is stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PhotoError>;
}

/// Disk storage backend, one file per blob in `base_path`
#[derive(Debug, Clone)]
pub struct DiskBlobBackend {
    base_path: PathBuf,
}

impl DiskBlobBackend {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Resolve a key to its file path, rejecting anything that could escape `base_path`
    fn blob_path(&self, key: &str) -> Result<PathBuf, PhotoError> {
        if key.is_empty()
            || key == "."
            || key == ".."
            || key.contains('/')
            || key.contains('\\')
            || key.contains('\0')
        {
            return Err(PhotoError::ValidationError(format!(
                "Invalid blob key: {:?}",
                key
            )));
        }
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl BlobBackend for DiskBlobBackend {
    async fn put(&self, key: &str, data: &[u8]) -> Result<(), PhotoError> {
        let path = self.blob_path(key)?;

        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            PhotoError::BlobStorageError(format!("Failed to create upload directory: {}", e))
        })?;

        fs::write(&path, data).await.map_err(|e| {
            log::error!("Failed to write blob {}: {}", key, e);
            PhotoError::BlobStorageError(format!("Failed to write blob {}: {}", key, e))
        })?;

        log::debug!("Stored blob {} ({} bytes)", key, data.len());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PhotoError> {
        let path = self.blob_path(key)?;

        match fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PhotoError::BlobStorageError(format!(
                "Failed to read blob {}: {}",
                key, e
            ))),
        }
    }
}
