// src/db/photo_repository.rs
// DOCUMENTATION: Photo database operations
// PURPOSE: Insert, list, search and like photos

use crate::errors::PhotoError;
use crate::models::Photo;
use sqlx::SqlitePool;

pub struct PhotoRepository;

impl PhotoRepository {
    /// Create a new photo
    /// DOCUMENTATION: Inserts the row with likes = 0. The blob behind
    /// `filename` must already be written.
    pub async fn create_photo(
        pool: &SqlitePool,
        id: &str,
        title: &str,
        caption: &str,
        filename: &str,
    ) -> Result<(), PhotoError> {
        sqlx::query(
            r#"
            INSERT INTO photos (id, title, caption, filename, likes)
            VALUES (?, ?, ?, ?, 0)
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(caption)
        .bind(filename)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create photo {}: {}", id, e);
            PhotoError::DatabaseError(format!("Create photo failed: {}", e))
        })?;

        Ok(())
    }

    /// List every photo in insertion order
    pub async fn list_photos(pool: &SqlitePool) -> Result<Vec<Photo>, PhotoError> {
        let photos = sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, title, caption, filename, likes
            FROM photos
            ORDER BY rowid ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list photos: {}", e);
            PhotoError::DatabaseError(format!("List photos failed: {}", e))
        })?;

        Ok(photos)
    }

    /// Search photos by title or caption
    /// DOCUMENTATION: Literal substring match, ASCII case-insensitive (SQLite LIKE).
    /// An empty query matches every photo.
    pub async fn search_photos(pool: &SqlitePool, query: &str) -> Result<Vec<Photo>, PhotoError> {
        let pattern = format!("%{}%", escape_like(query));

        let photos = sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, title, caption, filename, likes
            FROM photos
            WHERE title LIKE ? ESCAPE '\' OR caption LIKE ? ESCAPE '\'
            ORDER BY rowid ASC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to search photos for '{}': {}", query, e);
            PhotoError::DatabaseError(format!("Search photos failed: {}", e))
        })?;

        Ok(photos)
    }

    /// Increment likes by one and return the new count
    /// DOCUMENTATION: Single UPDATE ... RETURNING statement, so concurrent
    /// likes never lose an increment. Unknown ids yield NotFound.
    pub async fn like_photo(pool: &SqlitePool, id: &str) -> Result<i64, PhotoError> {
        let likes: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE photos
            SET likes = likes + 1
            WHERE id = ?
            RETURNING likes
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to like photo {}: {}", id, e);
            PhotoError::DatabaseError(format!("Like photo failed: {}", e))
        })?;

        likes
            .map(|(count,)| count)
            .ok_or_else(|| PhotoError::NotFound(format!("photo {}", id)))
    }
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
