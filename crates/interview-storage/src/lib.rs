//! Storage layer for the interview experience service.
//!
//! This crate provides SQLite-backed persistence for interview experience
//! records through a repository trait, so the lifecycle manager never
//! touches SQL directly.
//!
//! # Architecture
//!
//! - [`Database`] - Connection pool manager with embedded migrations
//! - [`InterviewRepository`] - Data access trait
//! - [`SqliteInterviewRepository`] - sqlx implementation of the trait
//!
//! # Examples
//!
//! ```no_run
//! use interview_storage::{Database, DatabaseConfig, NewInterview};
//! use interview_storage::repositories::{InterviewRepository, SqliteInterviewRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(DatabaseConfig::new("interview.db")).await?;
//! let repo = SqliteInterviewRepository::new(db.pool().clone());
//!
//! let record = repo
//!     .insert(NewInterview {
//!         owner_name: "Ada".to_string(),
//!         owner_email: "ada@example.com".to_string(),
//!         title: "Backend round".to_string(),
//!         content: "Two system design questions.".to_string(),
//!         company_tag: "acme".to_string(),
//!         attachment_ref: None,
//!     })
//!     .await?;
//!
//! for found in repo.find_by_owner_email("ada@example.com").await? {
//!     println!("{} ({})", found.title, found.id);
//! }
//! # let _ = record;
//! # Ok(())
//! # }
//! ```
//!
//! # Ordering
//!
//! Searches return the newest records first. Page queries order by the
//! requested column and then by `id` in the same direction, so rows with
//! equal sort keys always come back in the same order.

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{Database, DatabaseConfig};
pub use error::{StorageError, StorageResult};
pub use models::{InterviewRecord, NewInterview};
pub use repositories::{InterviewRepository, SqliteInterviewRepository};
