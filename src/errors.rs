// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and error response
#[derive(Error, Debug)]
pub enum PhotoError {
    /// Request is missing a required part or field
    #[error("{0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Blob storage error: {0}")]
    BlobStorageError(String),
}

impl PhotoError {
    fn error_code(&self) -> &'static str {
        match self {
            PhotoError::ValidationError(_) => "VALIDATION_ERROR",
            PhotoError::NotFound(_) => "NOT_FOUND",
            PhotoError::DatabaseError(_) => "DATABASE_ERROR",
            PhotoError::BlobStorageError(_) => "BLOB_STORAGE_ERROR",
        }
    }
}

/// Convert PhotoError to HTTP response
/// DOCUMENTATION: `error` carries the plain message so clients can show it directly
impl ResponseError for PhotoError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": self.to_string(),
            "code": self.error_code(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PhotoError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PhotoError::NotFound(_) => StatusCode::NOT_FOUND,
            PhotoError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PhotoError::BlobStorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
