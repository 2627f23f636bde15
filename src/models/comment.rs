// src/models/comment.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Stored comment record. `photo_id` is not checked against `photos`.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub photo_id: String,
    pub comment: String,
}

/// Request body for POST /add_comment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCommentRequest {
    #[validate(length(min = 1, message = "photo_id is required"))]
    pub photo_id: String,
    pub comment: String,
}

/// Response body for POST /add_comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAddedResponse {
    pub status: String,
}

impl CommentAddedResponse {
    pub fn added() -> Self {
        Self {
            status: "comment added".to_string(),
        }
    }
}
