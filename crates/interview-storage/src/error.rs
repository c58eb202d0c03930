use thiserror::Error;
use uuid::Uuid;

/// Storage-specific error types for the interview experience service.
///
/// These errors represent failures in database operations and in the
/// setup of the connection pool.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database connection or query execution failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration execution failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// No row with the given id exists
    #[error("Interview experience not found: {id}")]
    NotFound { id: Uuid },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Create a not-found error for `id`.
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    /// Whether the error means the row does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Specialized result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
