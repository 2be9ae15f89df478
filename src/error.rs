//! Failure taxonomy for the indice store.

use thiserror::Error;

/// Errors surfaced by the schema, store, seed, and service layers.
///
/// Empty results from filtering or random sampling are valid outcomes, not
/// errors, and never appear here.
#[derive(Debug, Error)]
pub enum Error {
    /// DDL failure while creating tables or indexes at startup. Fatal:
    /// callers abort instead of attempting partial-schema recovery.
    #[error("Schema creation failed: {0}")]
    Schema(#[source] sqlx::Error),

    /// Query or transaction failure, surfaced unmodified. Never retried;
    /// transactional operations roll back rather than partially commit.
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Malformed `add` input, rejected before any write.
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
