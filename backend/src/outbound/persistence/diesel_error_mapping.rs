//! Shared classification of Diesel and pool failures.
//!
//! Repositories turn a [`StoreFailure`] into their own port error so that the
//! domain never sees Diesel types.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse failure category shared by the Diesel repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum StoreFailure {
    /// The database could not be reached.
    Connection(String),
    /// A unique index rejected the write.
    UniqueViolation,
    /// Any other query failure.
    Query(String),
}

impl From<PoolError> for StoreFailure {
    fn from(error: PoolError) -> Self {
        Self::Connection(error.into_message())
    }
}

impl From<DieselError> for StoreFailure {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(%error, "diesel operation failed"),
        }

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Self::UniqueViolation
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
            | DieselError::BrokenTransactionManager => {
                Self::Connection("database connection error".to_owned())
            }
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => Self::Query("database query error".to_owned()),
            _ => Self::Query("database error".to_owned()),
        }
    }
}

/// Convert a stored counter into the signed column type.
pub(super) fn to_db_count(value: u64) -> Result<i64, StoreFailure> {
    i64::try_from(value).map_err(|_| StoreFailure::Query(format!("count {value} overflows")))
}

/// Convert a signed column value into a counter.
pub(super) fn from_db_count(value: i64) -> Result<u64, StoreFailure> {
    u64::try_from(value).map_err(|_| StoreFailure::Query(format!("negative count {value}")))
}
