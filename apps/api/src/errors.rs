use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::matching::response::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file type. Please upload a PDF or TXT file.")]
    UnsupportedFileType,

    #[error("Error processing file: {0}")]
    FileProcessing(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("Error querying Gemini: {0}")]
    RemoteService(#[from] LlmError),

    #[error("Failed to extract valid JSON from Gemini response")]
    Extraction(#[from] ExtractionError),

    #[error("Unexpected error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFileType
            | AppError::FileProcessing(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RemoteService(_) | AppError::Extraction(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFileType => "UNSUPPORTED_FILE_TYPE",
            AppError::FileProcessing(_) => "FILE_PROCESSING_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::UnprocessableEntity(_) => "UNPROCESSABLE_ENTITY",
            AppError::RemoteService(_) => "REMOTE_SERVICE_ERROR",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::RemoteService(e) => tracing::error!("Gemini error: {e}"),
            AppError::Extraction(e) => tracing::error!("Failed to extract JSON: {e}"),
            AppError::Internal(e) => tracing::error!("Unexpected error: {e:?}"),
            _ => tracing::debug!("Rejecting request: {self}"),
        }

        let body = Json(json!({
            "detail": self.to_string(),
            "code": self.code(),
        }));

        (self.status(), body).into_response()
    }
}
