// src/models/photo.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Prefix under which blobs are served back to clients
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Stored photo record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub caption: String,
    /// Blob key, `{id}_{original filename}`
    pub filename: String,
    pub likes: i64,
}

/// Photo DTO for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub url: String,
    pub likes: i64,
}

impl Photo {
    /// Convert database photo into API response DTO
    pub fn to_response(&self) -> PhotoResponse {
        PhotoResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            caption: self.caption.clone(),
            url: format!("{}/{}", UPLOADS_URL_PREFIX, self.filename),
            likes: self.likes,
        }
    }
}

/// Response body for POST /upload_photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadPhotoResponse {
    pub message: String,
    pub photo_id: String,
}

impl UploadPhotoResponse {
    pub fn uploaded(photo_id: String) -> Self {
        Self {
            message: "Photo uploaded".to_string(),
            photo_id,
        }
    }
}

/// Response body for POST /like_photo/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub likes: i64,
}

/// Query parameters for GET /search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}
