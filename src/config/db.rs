// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization
// PURPOSE: Setup the SQLite pool and create the schema if absent

use crate::config::Config;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Initialize SQLite connection pool
/// DOCUMENTATION: Creates the database file when missing, verifies the
/// connection and runs create-tables-if-absent.
/// Called once during application startup in main.rs
pub async fn init_db_pool(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    log::info!("Initializing database pool: {}", config.database_url);

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(config.db_connection_timeout));

    let pool = SqlitePoolOptions::new()
        // Maximum concurrent connections
        .max_connections(config.db_max_connections)
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        .connect_with(options)
        .await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    init_schema(&pool).await?;

    log::info!("Database pool initialized successfully");
    Ok(pool)
}

/// Create the photos and comments tables if they do not exist yet
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS photos (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL DEFAULT '',
            caption TEXT NOT NULL DEFAULT '',
            filename TEXT NOT NULL,
            likes INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    // No foreign key on photo_id: comments may reference missing photos.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            photo_id TEXT NOT NULL,
            comment TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_photo_id ON comments (photo_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// In-memory pool for tests. A single connection keeps every query on the
/// same database.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    init_schema(&pool).await.expect("schema");
    pool
}
