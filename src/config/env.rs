// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

/// Default upload limit for a single photo (10 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string
    /// Format: sqlite://path/to/photos.db
    pub database_url: String,

    /// Directory where uploaded image blobs are written
    pub upload_dir: PathBuf,

    /// Server bind address (e.g., "0.0.0.0")
    pub server_address: String,

    /// Server listen port (default 5000)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Maximum connections in database pool
    pub db_max_connections: u32,

    /// Connection timeout in seconds
    pub db_connection_timeout: u64,

    /// Largest accepted photo payload in bytes
    pub max_upload_bytes: usize,

    /// Allowed CORS origin, "*" accepts any
    pub cors_allowed_origin: String,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://photos.db".to_string()),

            upload_dir: PathBuf::from(
                env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            ),

            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),

            db_connection_timeout: env::var("DB_CONNECTION_TIMEOUT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),

            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "*".to_string()),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.is_empty() {
            return Err("DATABASE_URL is required".to_string());
        }

        if self.upload_dir.as_os_str().is_empty() {
            return Err("UPLOAD_DIR must not be empty".to_string());
        }

        if self.max_upload_bytes == 0 {
            return Err("MAX_UPLOAD_BYTES must be greater than zero".to_string());
        }

        if self.cors_allowed_origin == "*" && self.environment == "production" {
            log::warn!("CORS_ALLOWED_ORIGIN is '*' in production - any origin can call the API");
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_config(upload_dir: PathBuf) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        upload_dir,
        server_address: "127.0.0.1".to_string(),
        server_port: 0,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        db_max_connections: 1,
        db_connection_timeout: 5,
        max_upload_bytes: 1024,
        cors_allowed_origin: "*".to_string(),
    }
}
