use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use interview_service::InterviewError;
use thiserror::Error;
use tracing::error;

use crate::api::schemas::ErrorResponse;

/// Errors that can occur while starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The database could not be opened or migrated.
    #[error("storage error: {0}")]
    Storage(#[from] interview_storage::StorageError),

    /// The attachment store could not be set up.
    #[error("attachment store error: {0}")]
    Attachments(#[from] interview_attachments::AttachmentError),
}

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A lifecycle operation failed.
    #[error(transparent)]
    Interview(#[from] InterviewError),

    /// The multipart body could not be read.
    #[error("malformed multipart request: {0}")]
    Multipart(#[from] MultipartError),

    /// The request was malformed in some other way.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Interview(e) => match e {
                InterviewError::Validation(_) | InterviewError::InvalidSort(_) => {
                    StatusCode::BAD_REQUEST
                }
                InterviewError::NotFound { .. } => StatusCode::NOT_FOUND,
                InterviewError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                InterviewError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Multipart(e) => e.status(),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            Self::Interview(InterviewError::Validation(violations)) => ErrorResponse {
                error: "validation failed".to_string(),
                violations: Some(violations.clone()),
            },
            Self::Interview(InterviewError::Storage(e)) => {
                error!(error = %e, "storage failure while handling request");
                ErrorResponse::new("internal storage error")
            }
            Self::Multipart(e) => ErrorResponse::new(e.body_text()),
            other => ErrorResponse::new(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
