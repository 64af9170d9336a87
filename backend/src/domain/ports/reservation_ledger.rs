//! Driven ports for the standalone reservation API's relational store.

use async_trait::async_trait;

use crate::domain::{AdminLogin, LedgerReservation, NewLedgerReservation};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ledger adapters.
    pub enum LedgerError {
        /// A connection could not be checked out.
        Connection { message: String } => "ledger connection failed: {message}",
        /// The statement failed during execution.
        Query { message: String } => "ledger query failed: {message}",
    }
}

/// Reservation rows kept by the standalone API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationLedger: Send + Sync {
    /// Insert one reservation row.
    async fn insert(&self, reservation: &NewLedgerReservation) -> Result<(), LedgerError>;

    /// Return up to `limit` rows, most recently created first.
    async fn recent(&self, limit: i64) -> Result<Vec<LedgerReservation>, LedgerError>;
}

/// Stored admin credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminCredentials: Send + Sync {
    /// Whether a row matches both username and stored password value.
    async fn matches(&self, login: &AdminLogin) -> Result<bool, LedgerError>;

    /// Insert the admin row unless the username already exists.
    async fn ensure_admin(&self, login: &AdminLogin) -> Result<(), LedgerError>;
}
