//! Input validation for interview experience requests.
//!
//! Validation is a pure function over the request fields and the optional
//! attachment. It never stops at the first problem: every violated field is
//! reported so a client can fix the whole form in one round trip.
//!
//! # Rules
//!
//! | Field | Rule |
//! |-------|------|
//! | `ownerName` | required, at most 100 characters |
//! | `ownerEmail` | required, valid email syntax, at most 150 characters |
//! | `title` | 3-100 characters |
//! | `content` | at least 10 characters |
//! | `companyTag` | required, at most 200 characters |
//! | `image` | optional; if present, an allowed image type and at most 5 MiB |
//!
//! Lengths are counted in characters, not bytes.
//!
//! # Examples
//!
//! ```
//! use interview_core::{Attachment, InterviewRequest, validate_request};
//!
//! let request = InterviewRequest::new(
//!     "Ada",
//!     "a@b.com",
//!     "OK",
//!     "Long enough content here",
//!     "acme",
//! );
//! let image = Attachment::new(b"hello".to_vec(), "text/plain");
//!
//! let errors = validate_request(&request, Some(&image)).unwrap_err();
//! assert!(errors.contains_field("title"));
//! assert!(errors.contains_field("image"));
//! assert_eq!(errors.len(), 2);
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::constants::*;
use crate::request::{Attachment, InterviewRequest};

/// Email syntax accepted for owners: `local@domain.tld`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Violation {
    /// Request field name, in the camelCase used by the API.
    pub field: String,

    /// Human-readable description of the constraint.
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in one request, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Names of the violated fields.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|v| v.field.as_str())
    }

    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(Violation::new(field, message));
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<Vec<Violation>> for ValidationErrors {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check the request fields and the optional attachment.
///
/// An attachment with zero bytes is treated as absent.
///
/// # Errors
///
/// Returns every violation found, in field order.
pub fn validate_request(
    request: &InterviewRequest,
    attachment: Option<&Attachment>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_owner_name(&request.owner_name, &mut errors);
    check_owner_email(&request.owner_email, &mut errors);
    check_title(&request.title, &mut errors);
    check_content(&request.content, &mut errors);
    check_company_tag(&request.company_tag, &mut errors);
    check_attachment(attachment, &mut errors);

    errors.into_result()
}

/// Check only the attachment.
///
/// # Errors
///
/// Returns the attachment violations, if any.
pub fn validate_attachment(attachment: Option<&Attachment>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_attachment(attachment, &mut errors);
    errors.into_result()
}

/// Whether `email` has valid email syntax.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Whether `content_type` is on the attachment allow-list (case-insensitive).
///
/// Parameters such as `; charset=...` are ignored.
#[must_use]
pub fn is_allowed_image_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    ALLOWED_IMAGE_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(essence))
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn check_owner_name(owner_name: &str, errors: &mut ValidationErrors) {
    if owner_name.trim().is_empty() {
        errors.push("ownerName", "Owner name is required");
    } else if char_len(owner_name) > MAX_OWNER_NAME_LENGTH {
        errors.push(
            "ownerName",
            format!("Owner name must be at most {MAX_OWNER_NAME_LENGTH} characters"),
        );
    }
}

fn check_owner_email(owner_email: &str, errors: &mut ValidationErrors) {
    if owner_email.trim().is_empty() {
        errors.push("ownerEmail", "Owner email is required");
    } else if char_len(owner_email) > MAX_OWNER_EMAIL_LENGTH {
        errors.push(
            "ownerEmail",
            format!("Owner email must be at most {MAX_OWNER_EMAIL_LENGTH} characters"),
        );
    } else if !is_valid_email(owner_email) {
        errors.push("ownerEmail", "Invalid email format");
    }
}

fn check_title(title: &str, errors: &mut ValidationErrors) {
    if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&char_len(title)) {
        errors.push(
            "title",
            format!(
                "Title must be between {MIN_TITLE_LENGTH} and {MAX_TITLE_LENGTH} characters"
            ),
        );
    }
}

fn check_content(content: &str, errors: &mut ValidationErrors) {
    if char_len(content) < MIN_CONTENT_LENGTH {
        errors.push(
            "content",
            format!("Content must be at least {MIN_CONTENT_LENGTH} characters long"),
        );
    }
}

fn check_company_tag(company_tag: &str, errors: &mut ValidationErrors) {
    if company_tag.trim().is_empty() {
        errors.push("companyTag", "Company tag is required");
    } else if char_len(company_tag) > MAX_COMPANY_TAG_LENGTH {
        errors.push(
            "companyTag",
            format!("Company tag must be at most {MAX_COMPANY_TAG_LENGTH} characters"),
        );
    }
}

fn check_attachment(attachment: Option<&Attachment>, errors: &mut ValidationErrors) {
    let Some(attachment) = attachment.filter(|a| !a.is_empty()) else {
        return;
    };

    if !is_allowed_image_type(attachment.content_type()) {
        errors.push(
            "image",
            "Invalid image type. Allowed types are JPG, JPEG, PNG, GIF and WebP.",
        );
    }

    if attachment.len() > MAX_ATTACHMENT_BYTES {
        errors.push(
            "image",
            format!(
                "Image must be at most {MAX_ATTACHMENT_BYTES} bytes (got {} bytes)",
                attachment.len()
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_request() -> InterviewRequest {
        InterviewRequest::new(
            "Ada Lovelace",
            "a@b.com",
            "Backend round",
            "Twenty characters!!!",
            "acme",
        )
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_request(&valid_request(), None).is_ok());
    }

    #[test]
    fn test_two_character_title_rejected() {
        let mut request = valid_request();
        request.title = "ab".to_string();

        let errors = validate_request(&request, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_field("title"));
    }

    #[rstest]
    #[case(3, true)]
    #[case(100, true)]
    #[case(2, false)]
    #[case(101, false)]
    fn test_title_bounds(#[case] len: usize, #[case] ok: bool) {
        let mut request = valid_request();
        request.title = "t".repeat(len);
        assert_eq!(validate_request(&request, None).is_ok(), ok);
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        let mut request = valid_request();
        request.title = "ção".to_string(); // 3 chars, 5 bytes
        assert!(validate_request(&request, None).is_ok());

        request.title = "é".repeat(100); // 100 chars, 200 bytes
        assert!(validate_request(&request, None).is_ok());
    }

    #[rstest]
    #[case("0123456789", true)]
    #[case("012345678", false)]
    #[case("", false)]
    fn test_content_minimum(#[case] content: &str, #[case] ok: bool) {
        let mut request = valid_request();
        request.content = content.to_string();
        assert_eq!(validate_request(&request, None).is_ok(), ok);
    }

    #[rstest]
    #[case("a@b.com")]
    #[case("first.last+tag@sub.example.co")]
    #[case("o'reilly@example.org")]
    fn test_email_valid(#[case] email: &str) {
        assert!(is_valid_email(email));
    }

    #[rstest]
    #[case("plainaddress")]
    #[case("@example.com")]
    #[case("user@")]
    #[case("user@localhost")]
    #[case("user name@example.com")]
    #[case("user@exa mple.com")]
    #[case("user@-example.com")]
    fn test_email_invalid(#[case] email: &str) {
        assert!(!is_valid_email(email));
    }

    #[rstest]
    #[case("image/jpeg")]
    #[case("image/jpg")]
    #[case("image/png")]
    #[case("image/gif")]
    #[case("image/webp")]
    #[case("IMAGE/PNG")]
    #[case("image/png; charset=binary")]
    fn test_allowed_image_types(#[case] content_type: &str) {
        assert!(is_allowed_image_type(content_type));
    }

    #[rstest]
    #[case("text/plain")]
    #[case("image/svg+xml")]
    #[case("application/pdf")]
    #[case("")]
    fn test_rejected_image_types(#[case] content_type: &str) {
        assert!(!is_allowed_image_type(content_type));
    }

    #[test]
    fn test_text_plain_attachment_rejected() {
        let attachment = Attachment::new(b"not an image".to_vec(), "text/plain");
        let errors = validate_request(&valid_request(), Some(&attachment)).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["image"]);
    }

    #[test]
    fn test_missing_content_type_rejected() {
        let attachment = Attachment {
            bytes: bytes::Bytes::from_static(b"\x89PNG"),
            content_type: None,
            filename: Some("logo.png".to_string()),
        };
        assert!(validate_attachment(Some(&attachment)).is_err());
    }

    #[test]
    fn test_empty_attachment_always_valid() {
        let attachment = Attachment::new(Vec::<u8>::new(), "text/plain");
        assert!(validate_request(&valid_request(), Some(&attachment)).is_ok());
    }

    #[test]
    fn test_oversized_attachment_rejected() {
        let attachment = Attachment::new(vec![0u8; MAX_ATTACHMENT_BYTES + 1], "image/png");
        let errors = validate_attachment(Some(&attachment)).unwrap_err();
        assert!(errors.contains_field("image"));
    }

    #[test]
    fn test_all_violations_reported() {
        let request = InterviewRequest::new("", "not-an-email", "ab", "short", " ");
        let attachment = Attachment::new(b"text".to_vec(), "text/plain");

        let errors = validate_request(&request, Some(&attachment)).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["ownerName", "ownerEmail", "title", "content", "companyTag", "image"]
        );
    }

    #[test]
    fn test_missing_email_reports_required() {
        let mut request = valid_request();
        request.owner_email = String::new();

        let errors = validate_request(&request, None).unwrap_err();
        assert_eq!(errors.violations()[0].message, "Owner email is required");
    }

    #[test]
    fn test_display_joins_violations() {
        let errors = ValidationErrors::from(vec![
            Violation::new("title", "too short"),
            Violation::new("content", "too short"),
        ]);
        assert_eq!(errors.to_string(), "title: too short; content: too short");
    }

    #[test]
    fn test_errors_serialize_as_list() {
        let errors = ValidationErrors::from(vec![Violation::new("title", "too short")]);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json[0]["field"], "title");
        assert_eq!(json[0]["message"], "too short");
    }
}
