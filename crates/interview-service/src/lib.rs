//! Lifecycle manager for interview experience records.
//!
//! Ties the validation layer, the record repository and the attachment store
//! together. See [`InterviewService`] for the operation semantics and
//! [`InterviewError`] for the failure taxonomy.
//!
//! # Examples
//!
//! ```
//! use interview_attachments::MemoryAttachmentStore;
//! use interview_core::InterviewRequest;
//! use interview_service::InterviewService;
//! use interview_storage::{Database, SqliteInterviewRepository};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::in_memory().await?;
//! let service = InterviewService::new(
//!     SqliteInterviewRepository::new(db.pool().clone()),
//!     MemoryAttachmentStore::new(),
//! );
//!
//! let request = InterviewRequest::new(
//!     "Ada",
//!     "a@b.com",
//!     "Backend round",
//!     "Twenty chars of text",
//!     "acme",
//! );
//! let record = service.create(request, None).await?;
//!
//! let mine = service.search_by_email("a@b.com").await?;
//! assert_eq!(mine, vec![record]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod lifecycle;
pub mod query;

pub use error::{InterviewError, Result};
pub use lifecycle::InterviewService;
pub use query::ListQuery;
