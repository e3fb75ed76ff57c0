//! Diesel and pool error mapping for record repositories.
//!
//! Driver messages never reach the domain verbatim; they are logged at debug
//! level and replaced with a short category string.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool failures to connection errors.
pub(super) fn map_pool_error(error: PoolError) -> RepositoryError {
    debug!(%error, "connection pool checkout failed");
    RepositoryError::connection("database connection unavailable")
}

/// Map Diesel failures to connection or query errors.
pub(super) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        )
        | DieselError::BrokenTransactionManager => {
            RepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RepositoryError::query("unique constraint violated")
        }
        _ => RepositoryError::query("database error"),
    }
}
