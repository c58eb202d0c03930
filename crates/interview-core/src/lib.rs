//! Shared vocabulary for the interview experience service.
//!
//! This crate holds everything the other crates agree on without depending on
//! storage or transport: request types, the validation layer, pagination and
//! sorting types, and service-wide constants.

pub mod constants;
pub mod error;
pub mod request;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use request::{Attachment, InterviewRequest, non_empty};
pub use types::*;
pub use validation::{
    ValidationErrors, Violation, is_allowed_image_type, is_valid_email, validate_attachment,
    validate_request,
};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
