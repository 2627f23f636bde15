// src/services/photo_store.rs
// DOCUMENTATION: Photo and comment operations
// PURPOSE: Single owner of photo/comment records and their blobs, shared by all handlers

use crate::db::{CommentRepository, PhotoRepository};
use crate::errors::PhotoError;
use crate::models::PhotoResponse;
use crate::services::BlobBackend;
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

/// PhotoStore: built once at startup and injected into the HTTP layer
#[derive(Clone)]
pub struct PhotoStore {
    pool: SqlitePool,
    blobs: Arc<dyn BlobBackend>,
}

impl PhotoStore {
    pub fn new(pool: SqlitePool, blobs: Arc<dyn BlobBackend>) -> Self {
        Self { pool, blobs }
    }

    /// Store an uploaded photo
    /// DOCUMENTATION: Writes the blob under `{id}_{name}` first, then inserts the
    /// record. A failed insert leaves the blob behind.
    pub async fn upload_photo(
        &self,
        title: &str,
        caption: &str,
        original_filename: &str,
        data: &[u8],
    ) -> Result<String, PhotoError> {
        let name = base_filename(original_filename)
            .ok_or_else(|| PhotoError::ValidationError("No selected file".to_string()))?;

        let photo_id = Uuid::new_v4().to_string();
        let blob_key = format!("{}_{}", photo_id, name);

        self.blobs.put(&blob_key, data).await?;
        self.create_photo(&photo_id, title, caption, &blob_key).await?;

        log::info!(
            "Photo uploaded: id={} filename={} bytes={}",
            photo_id,
            blob_key,
            data.len()
        );
        Ok(photo_id)
    }

    /// Insert a photo record for an already stored blob
    pub async fn create_photo(
        &self,
        photo_id: &str,
        title: &str,
        caption: &str,
        blob_key: &str,
    ) -> Result<(), PhotoError> {
        PhotoRepository::create_photo(&self.pool, photo_id, title, caption, blob_key).await?;
        log::debug!("Photo record created: id={}", photo_id);
        Ok(())
    }

    pub async fn list_photos(&self) -> Result<Vec<PhotoResponse>, PhotoError> {
        let photos = PhotoRepository::list_photos(&self.pool).await?;
        log::debug!("Listed {} photos", photos.len());
        Ok(photos.iter().map(|p| p.to_response()).collect())
    }

    /// Photos whose title or caption contains `query` (ASCII case-insensitive)
    pub async fn search_photos(&self, query: &str) -> Result<Vec<PhotoResponse>, PhotoError> {
        let photos = PhotoRepository::search_photos(&self.pool, query).await?;
        log::debug!("Search '{}' matched {} photos", query, photos.len());
        Ok(photos.iter().map(|p| p.to_response()).collect())
    }

    pub async fn add_comment(&self, photo_id: &str, comment: &str) -> Result<(), PhotoError> {
        let comment_id = CommentRepository::add_comment(&self.pool, photo_id, comment).await?;
        log::info!("Comment added: id={} photo_id={}", comment_id, photo_id);
        Ok(())
    }

    pub async fn get_comments(&self, photo_id: &str) -> Result<Vec<String>, PhotoError> {
        let comments = CommentRepository::get_comments(&self.pool, photo_id).await?;
        log::debug!("Fetched {} comments for photo {}", comments.len(), photo_id);
        Ok(comments)
    }

    /// Add one like and return the new total
    pub async fn like_photo(&self, photo_id: &str) -> Result<i64, PhotoError> {
        let likes = PhotoRepository::like_photo(&self.pool, photo_id).await?;
        log::info!("Photo liked: id={} likes={}", photo_id, likes);
        Ok(likes)
    }

    /// Raw bytes of an uploaded photo, `None` if no such blob exists
    pub async fn get_blob(&self, filename: &str) -> Result<Option<Vec<u8>>, PhotoError> {
        self.blobs.get(filename).await
    }
}

/// Final path component of a client-supplied filename, `None` when empty
fn base_filename(original: &str) -> Option<&str> {
    original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
}

#[cfg(test)]
pub(crate) async fn test_store() -> (PhotoStore, tempfile::TempDir) {
    use crate::services::DiskBlobBackend;

    let dir = tempfile::tempdir().expect("tempdir");
    let pool = crate::config::db::test_pool().await;
    let store = PhotoStore::new(pool, Arc::new(DiskBlobBackend::new(dir.path().join("uploads"))));
    (store, dir)
}
