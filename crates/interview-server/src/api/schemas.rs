use interview_core::ValidationErrors;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    #[schema(example = "interview experience not found: 7b1f0c9e-3c43-4a63-a1a4-1c2d3e4f5a6b")]
    pub error: String,
    /// Per-field violations, present on validation failures only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violations: Option<ValidationErrors>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            violations: None,
        }
    }
}

/// Response of `GET /health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "0.1.0")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of a successful delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Interview experience deleted")]
    pub message: String,
    pub id: Uuid,
}

/// Multipart form accepted by create and update.
///
/// Only documents the body; handlers decode it part by part.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterviewUpload {
    #[schema(example = "Ada Lovelace")]
    pub owner_name: String,
    /// Ignored on create when the `X-User-Email` header is set.
    #[schema(example = "ada@example.com")]
    pub owner_email: String,
    #[schema(example = "Backend onsite loop")]
    pub title: String,
    #[schema(example = "Three coding rounds and a system design chat.")]
    pub content: String,
    #[schema(example = "acme")]
    pub company_tag: String,
    /// PNG, JPEG, GIF or WebP image, at most 5 MiB.
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}
