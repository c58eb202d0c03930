//! Multipart form decoding for create and update requests.

use axum::extract::Multipart;
use axum::http::HeaderMap;
use interview_core::constants::OWNER_EMAIL_HEADER;
use interview_core::{Attachment, InterviewRequest};
use tracing::debug;

use crate::error::ApiError;

/// Name of the file part carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Decoded multipart form.
#[derive(Debug, Default)]
pub struct InterviewForm {
    pub request: InterviewRequest,
    pub attachment: Option<Attachment>,
}

impl InterviewForm {
    /// Read every part of `multipart`.
    ///
    /// Text parts fill the request fields by their camelCase names; the
    /// `image` part becomes the attachment. Missing text parts stay empty
    /// and are reported by validation. Unknown parts are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                IMAGE_FIELD => {
                    let content_type = field.content_type().map(str::to_owned);
                    let filename = field.file_name().map(str::to_owned);
                    let bytes = field.bytes().await?;
                    form.attachment = Some(Attachment {
                        bytes,
                        content_type,
                        filename,
                    });
                }
                "ownerName" => form.request.owner_name = field.text().await?,
                "ownerEmail" => form.request.owner_email = field.text().await?,
                "title" => form.request.title = field.text().await?,
                "content" => form.request.content = field.text().await?,
                "companyTag" => form.request.company_tag = field.text().await?,
                other => debug!(field = %other, "ignoring unknown multipart field"),
            }
        }

        Ok(form)
    }

    /// Let the `X-User-Email` header, when present and non-blank, override
    /// the email from the body.
    pub fn apply_owner_header(&mut self, headers: &HeaderMap) {
        if let Some(email) = owner_email_header(headers) {
            self.request.owner_email = email;
        }
    }
}

/// Non-blank value of the `X-User-Email` header.
pub fn owner_email_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(OWNER_EMAIL_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
