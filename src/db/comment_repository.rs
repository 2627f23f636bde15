// src/db/comment_repository.rs
// DOCUMENTATION: Comment database operations
// PURPOSE: Append comments and read them back per photo

use crate::errors::PhotoError;
use crate::models::Comment;
use sqlx::SqlitePool;

pub struct CommentRepository;

impl CommentRepository {
    /// Append a comment to a photo
    /// DOCUMENTATION: The photo is not required to exist. Returns the new comment id.
    pub async fn add_comment(
        pool: &SqlitePool,
        photo_id: &str,
        comment: &str,
    ) -> Result<i64, PhotoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO comments (photo_id, comment)
            VALUES (?, ?)
            "#,
        )
        .bind(photo_id)
        .bind(comment)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to add comment to photo {}: {}", photo_id, e);
            PhotoError::DatabaseError(format!("Add comment failed: {}", e))
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Get comment texts for a photo, oldest first
    pub async fn get_comments(pool: &SqlitePool, photo_id: &str) -> Result<Vec<String>, PhotoError> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, photo_id, comment
            FROM comments
            WHERE photo_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(photo_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch comments for photo {}: {}", photo_id, e);
            PhotoError::DatabaseError(format!("Fetch comments failed: {}", e))
        })?;

        Ok(comments.into_iter().map(|c| c.comment).collect())
    }
}
