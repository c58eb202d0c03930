//! HTTP surface for the interview experience service.
//!
//! Exposes the lifecycle operations as JSON endpoints with multipart
//! uploads, plus the configuration loading used by the binary.

pub mod api;
pub mod config;
pub mod error;

pub use api::{AppService, AppState, router};
pub use config::InterviewConfig;
pub use error::{ApiError, ServerError};

use interview_attachments::AttachmentBackend;
use interview_service::InterviewService;
use interview_storage::{Database, SqliteInterviewRepository};
use tracing::info;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Open the database and attachment store described by `config` and wire
/// them into the application state.
///
/// # Errors
///
/// Returns [`ServerError`] if the database cannot be opened or the
/// attachment store is misconfigured.
pub async fn build_state(config: &InterviewConfig) -> Result<(AppState, Database), ServerError> {
    let db = Database::new(config.database.clone()).await?;
    let attachments = AttachmentBackend::from_config(&config.attachments.store).await?;

    info!(
        backend = ?attachments.kind(),
        namespace = %config.attachments.namespace,
        "attachment store ready"
    );

    let service = InterviewService::new(SqliteInterviewRepository::new(db.pool().clone()), attachments)
        .with_namespace(config.attachments.namespace.clone());

    Ok((AppState::new(service, config.listing.clone()), db))
}
