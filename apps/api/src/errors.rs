use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Validation failures map to the exact wire messages the frontend matches on
/// (`{"error": "..."}`); internal failures are logged in full and surfaced
/// with an opaque message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no resume file in request")]
    MissingFile,

    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("file exceeds the upload size limit")]
    FileTooLarge,

    #[error("user not found")]
    UserNotFound,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Extraction failed after the record was already persisted. The record
    /// is kept with status `failed`; the caller gets its id back.
    #[error("resume processing failed: {message}")]
    ProcessingFailed { resume_id: Uuid, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingFile => (StatusCode::BAD_REQUEST, "No file uploaded".to_string()),
            AppError::UnsupportedFileType(ext) => (
                StatusCode::BAD_REQUEST,
                format!("File type not allowed: {ext} (only PDF, DOC, and DOCX are accepted)"),
            ),
            AppError::FileTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "File too large: resumes must be 5 MB or smaller".to_string(),
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Resume processing failed".to_string(),
                )
            }
            AppError::ProcessingFailed { resume_id, message } => {
                tracing::error!("Resume {resume_id} processing failed: {message}");
                let body = Json(json!({
                    "error": "Resume uploaded but processing failed",
                    "message": message,
                    "resume_id": resume_id,
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
