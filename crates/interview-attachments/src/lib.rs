//! Object storage for interview experience attachments.
//!
//! Provides the [`AttachmentStore`] trait and two implementations:
//!
//! - [`S3AttachmentStore`] for S3 and S3-compatible servers
//! - [`MemoryAttachmentStore`] for tests and local development
//!
//! [`AttachmentBackend`] picks one of them from configuration at startup.

pub mod backend;
pub mod error;
pub mod key;
pub mod memory;
pub mod s3;
pub mod store;

pub use backend::{AttachmentBackend, AttachmentConfig, BackendKind};
pub use error::{AttachmentError, Result};
pub use memory::{MemoryAttachmentStore, StoredObject};
pub use s3::{S3AttachmentStore, S3Config};
pub use store::AttachmentStore;
