//! Shared Diesel error mapping for the registry repositories.
//!
//! Each repository passes its own port error constructors, so the
//! classification below stays in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Whether `error` is a unique-constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Map Diesel errors into query or connection failures.
///
/// The database message is logged at debug level and never returned.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        _ => query("database error"),
    }
}
