use chrono::{DateTime, Utc};
use interview_core::InterviewRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored interview experience.
///
/// # Fields
///
/// * `id` - UUID assigned by the repository at insert, never changed
/// * `owner_name` - Display name of the author
/// * `owner_email` - Email of the author, used for "my experiences" lookups
/// * `title` - Short headline (3-100 characters)
/// * `content` - Free-form body (at least 10 characters)
/// * `company_tag` - Company the experience is about
/// * `attachment_ref` - Public URL of the image attachment, if any
/// * `created_at` - Set once at insert
/// * `updated_at` - Set at insert and on every update
///
/// # Database Schema
///
/// Maps to the `interview_experiences` table. `created_at <= updated_at` is
/// enforced by a CHECK constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub id: Uuid,
    pub owner_name: String,
    pub owner_email: String,
    pub title: String,
    pub content: String,
    pub company_tag: String,
    pub attachment_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewRecord {
    /// Whether the record references an attachment.
    pub fn has_attachment(&self) -> bool {
        self.attachment_ref.is_some()
    }

    /// Overwrite the caller-editable fields from `request`.
    ///
    /// `id`, `attachment_ref` and the timestamps are left alone.
    pub fn apply(&mut self, request: &InterviewRequest) {
        self.owner_name.clone_from(&request.owner_name);
        self.owner_email.clone_from(&request.owner_email);
        self.title.clone_from(&request.title);
        self.content.clone_from(&request.content);
        self.company_tag.clone_from(&request.company_tag);
    }
}

/// Field values for a record that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInterview {
    pub owner_name: String,
    pub owner_email: String,
    pub title: String,
    pub content: String,
    pub company_tag: String,
    pub attachment_ref: Option<String>,
}

impl NewInterview {
    /// Build the insert payload from a validated request.
    pub fn from_request(request: &InterviewRequest, attachment_ref: Option<String>) -> Self {
        Self {
            owner_name: request.owner_name.clone(),
            owner_email: request.owner_email.clone(),
            title: request.title.clone(),
            content: request.content.clone(),
            company_tag: request.company_tag.clone(),
            attachment_ref,
        }
    }

    /// Materialize the record with a fresh id, stamped at `now`.
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> InterviewRecord {
        InterviewRecord {
            id,
            owner_name: self.owner_name,
            owner_email: self.owner_email,
            title: self.title,
            content: self.content,
            company_tag: self.company_tag,
            attachment_ref: self.attachment_ref,
            created_at: now,
            updated_at: now,
        }
    }
}
