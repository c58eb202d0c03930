//! Core constants for the interview experience service.
//!
//! This module centralizes the limits enforced by the validation layer, the
//! listing defaults applied when a caller omits pagination parameters, and
//! the blob store namespace that groups every uploaded attachment.
//!
//! # Usage
//!
//! ```
//! use interview_core::constants::*;
//!
//! assert_eq!(DEFAULT_PAGE_SIZE, 10);
//! assert_eq!(DEFAULT_SORT_BY, "updatedAt");
//!
//! fn title_fits(title: &str) -> bool {
//!     (MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&title.chars().count())
//! }
//! assert!(title_fits("Backend round"));
//! ```

// ============================================================================
// Listing Defaults
// ============================================================================

/// Page number used when the caller does not supply one (0-based).
pub const DEFAULT_PAGE_NUMBER: u32 = 0;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sort field used when the caller does not supply one.
///
/// Must be a name accepted by [`crate::SortField`].
pub const DEFAULT_SORT_BY: &str = "updatedAt";

/// Sort direction used when the caller does not supply one.
pub const DEFAULT_SORT_DIR: &str = "asc";

// ============================================================================
// Attachment Storage
// ============================================================================

/// Blob store namespace under which every interview attachment is stored.
///
/// Object keys take the form `interview-experience/{uuid}_{filename}`.
pub const ATTACHMENT_NAMESPACE: &str = "interview-experience";

/// Content types accepted for attachments (compared case-insensitively).
///
/// `image/jpg` is not a registered media type but browsers and some HTTP
/// clients still send it, so it is accepted as an alias of `image/jpeg`.
pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Largest attachment accepted, in bytes (5 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Filename hint used for attachments uploaded without one.
pub const DEFAULT_ATTACHMENT_FILENAME: &str = "attachment";

// ============================================================================
// Field Limits
// ============================================================================

/// Minimum title length in characters.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Minimum content length in characters.
pub const MIN_CONTENT_LENGTH: usize = 10;

/// Maximum owner name length in characters (matches the column width).
pub const MAX_OWNER_NAME_LENGTH: usize = 100;

/// Maximum owner email length in characters (matches the column width).
pub const MAX_OWNER_EMAIL_LENGTH: usize = 150;

/// Maximum company tag length in characters (matches the column width).
pub const MAX_COMPANY_TAG_LENGTH: usize = 200;

// ============================================================================
// HTTP
// ============================================================================

/// Header carrying the authenticated owner's email, set by the gateway.
pub const OWNER_EMAIL_HEADER: &str = "x-user-email";
