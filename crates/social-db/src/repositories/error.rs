//! Error handling utilities for repositories

use social_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map a foreign key violation (e.g. missing post) or fall back to a database error
pub fn map_foreign_key_violation<F>(e: SqlxError, on_fk: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_fk();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

pub fn user_not_found(id: i64) -> DomainError {
    DomainError::UserNotFound(id)
}

pub fn post_not_found(id: i64) -> DomainError {
    DomainError::PostNotFound(id)
}

/// Clamp a page size to 1..=100
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, 100)
}
