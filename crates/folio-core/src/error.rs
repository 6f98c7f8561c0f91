//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
///
/// Missing entities are not errors at this level: lookups return `Ok(None)`
/// and deletes return `Ok(false)`.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Stored record is malformed: {0}")]
    Corrupt(String),
}
