//! Shared Diesel error mapping for the repositories in this module.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Unique constraint guarding `users.email`.
pub(super) const USERS_EMAIL_CONSTRAINT: &str = "users_uc_email";

/// Coarse classification of a Diesel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// Insert hit the unique constraint with this name.
    UniqueViolation(Option<String>),
    /// Anything else, including "no rows".
    Query(&'static str),
}

/// Extract the message from a pool error for a repository connection error.
pub(super) fn pool_error_message(error: PoolError) -> String {
    error.into_message()
}

/// Log a Diesel error at debug level and classify it.
pub(super) fn classify_diesel_error(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation(info.constraint_name().map(str::to_owned))
        }
        _ => DieselFailure::Query("database error"),
    }
}
