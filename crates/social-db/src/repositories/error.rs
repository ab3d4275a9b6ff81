//! Error handling utilities for repositories

use social_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert a SQLx error to a DomainError
///
/// Connection-level failures (pool exhaustion, dropped sockets) are
/// reported as transient; everything else is a plain database error.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => {
            DomainError::TransientIoFailure(e.to_string())
        }
        other => DomainError::DatabaseError(other.to_string()),
    }
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
    {
        return on_unique();
    }
    map_db_error(e)
}
