//! Error types for lifecycle operations.

use interview_attachments::AttachmentError;
use interview_core::ValidationErrors;
use interview_storage::StorageError;
use uuid::Uuid;

/// Result type alias for lifecycle operations.
pub type Result<T> = std::result::Result<T, InterviewError>;

/// Errors returned by [`crate::InterviewService`].
#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    /// Caller input violates one or more field rules.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// No record exists with this id.
    #[error("Interview experience not found: {id}")]
    NotFound { id: Uuid },

    /// The attachment store could not store the upload.
    #[error("Attachment store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// The listing was asked to sort by an unknown field.
    #[error("Invalid sort field: {0}")]
    InvalidSort(String),

    /// The record repository failed.
    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl InterviewError {
    /// Create a new not-found error.
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    /// Create a new store-unavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Violations carried by a validation error.
    pub fn violations(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for InterviewError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<interview_core::Error> for InterviewError {
    fn from(error: interview_core::Error) -> Self {
        match error {
            interview_core::Error::Validation(errors) => Self::Validation(errors),
            interview_core::Error::InvalidSort(name) => Self::InvalidSort(name),
        }
    }
}

impl From<StorageError> for InterviewError {
    fn from(error: StorageError) -> Self {
        match error {
            // A row removed between fetch and write surfaces as a plain miss.
            StorageError::NotFound { id } => Self::NotFound { id },
            other => Self::Storage(other),
        }
    }
}

impl From<AttachmentError> for InterviewError {
    fn from(error: AttachmentError) -> Self {
        match error {
            AttachmentError::Unavailable { message } => Self::StoreUnavailable { message },
            other => Self::store_unavailable(other.to_string()),
        }
    }
}
