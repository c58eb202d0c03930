use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors raised while checking caller input, before any storage is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// One or more request fields violate their constraints.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The requested sort field is not one of the sortable columns.
    #[error("Invalid sort field: {0}")]
    InvalidSort(String),
}

pub type Result<T> = std::result::Result<T, Error>;
