//! Diesel and pool error mapping into [`LedgerError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::LedgerError;

pub(super) fn map_pool_error(error: PoolError) -> LedgerError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            LedgerError::connection(message)
        }
    }
}

/// Map Diesel errors, keeping driver detail out of the message.
pub(super) fn map_diesel_error(error: DieselError) -> LedgerError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            LedgerError::connection("database connection error")
        }
        DieselError::NotFound => LedgerError::query("record not found"),
        _ => LedgerError::query("database error"),
    }
}
