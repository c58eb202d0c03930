use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ATTACHMENT_FILENAME;

/// Caller-supplied fields of an interview experience.
///
/// Used for both create and update; on update every field overwrites the
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequest {
    pub owner_name: String,
    pub owner_email: String,
    pub title: String,
    pub content: String,
    pub company_tag: String,
}

impl InterviewRequest {
    pub fn new(
        owner_name: impl Into<String>,
        owner_email: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        company_tag: impl Into<String>,
    ) -> Self {
        Self {
            owner_name: owner_name.into(),
            owner_email: owner_email.into(),
            title: title.into(),
            content: content.into(),
            company_tag: company_tag.into(),
        }
    }
}

/// An uploaded image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Raw file contents.
    pub bytes: Bytes,

    /// Declared MIME type, as sent by the client.
    pub content_type: Option<String>,

    /// Original filename, used as a hint in the object key.
    pub filename: Option<String>,
}

impl Attachment {
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: Some(content_type.into()),
            filename: None,
        }
    }

    /// Set the original filename.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// An attachment with no bytes counts as "no attachment".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Declared content type, or an empty string when none was sent.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or_default()
    }

    /// Filename hint, falling back to a generic name.
    #[must_use]
    pub fn filename_hint(&self) -> &str {
        self.filename
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ATTACHMENT_FILENAME)
    }
}

/// Drop empty uploads so the rest of the pipeline only sees real files.
#[must_use]
pub fn non_empty(attachment: Option<Attachment>) -> Option<Attachment> {
    attachment.filter(|a| !a.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_hint_fallback() {
        let attachment = Attachment::new(vec![1u8, 2, 3], "image/png");
        assert_eq!(attachment.filename_hint(), "attachment");

        let attachment = attachment.with_filename("   ");
        assert_eq!(attachment.filename_hint(), "attachment");
    }

    #[test]
    fn test_filename_hint_present() {
        let attachment = Attachment::new(vec![1u8], "image/png").with_filename("logo.png");
        assert_eq!(attachment.filename_hint(), "logo.png");
    }

    #[test]
    fn test_non_empty_drops_empty_upload() {
        let empty = Attachment::new(Vec::<u8>::new(), "image/png");
        assert!(non_empty(Some(empty)).is_none());

        let full = Attachment::new(vec![0xFFu8, 0xD8], "image/jpeg");
        assert!(non_empty(Some(full)).is_some());
        assert!(non_empty(None).is_none());
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let json = r#"{
            "ownerName": "Ada",
            "ownerEmail": "ada@example.com",
            "title": "Backend round",
            "content": "Two hours of systems design",
            "companyTag": "acme"
        }"#;
        let request: InterviewRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.owner_name, "Ada");
        assert_eq!(request.company_tag, "acme");
    }
}
