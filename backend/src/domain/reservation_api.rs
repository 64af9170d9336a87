//! Domain types and service for the standalone reservation API.
//!
//! This subsystem shares nothing with the hosted-store flows: it keeps its
//! own reservation rows and admin credentials in a relational ledger.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::ports::{AdminCredentials, LedgerError, ReservationLedger};

/// Number of rows returned by [`ReservationApiService::recent`].
pub const LEDGER_RECENT_LIMIT: i64 = 10;

/// Admin credentials as submitted to the login route.
///
/// `password_hash` is compared verbatim with the stored value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AdminLogin {
    pub username: String,
    pub password_hash: String,
}

impl std::fmt::Debug for AdminLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminLogin")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Reservation row to insert.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewLedgerReservation {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub special_requests: Option<String>,
}

/// Stored reservation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerReservation {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of an admin login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminLoginOutcome {
    Accepted,
    Rejected,
}

#[derive(Clone)]
pub struct ReservationApiService {
    ledger: Arc<dyn ReservationLedger>,
    admins: Arc<dyn AdminCredentials>,
}

impl ReservationApiService {
    pub fn new(ledger: Arc<dyn ReservationLedger>, admins: Arc<dyn AdminCredentials>) -> Self {
        Self { ledger, admins }
    }

    pub async fn login(&self, login: &AdminLogin) -> Result<AdminLoginOutcome, LedgerError> {
        let matched = self.admins.matches(login).await?;
        if matched {
            info!(username = %login.username, "admin login accepted");
            Ok(AdminLoginOutcome::Accepted)
        } else {
            warn!(username = %login.username, "admin login rejected");
            Ok(AdminLoginOutcome::Rejected)
        }
    }

    pub async fn create(&self, reservation: &NewLedgerReservation) -> Result<(), LedgerError> {
        self.ledger.insert(reservation).await
    }

    pub async fn recent(&self) -> Result<Vec<LedgerReservation>, LedgerError> {
        self.ledger.recent(LEDGER_RECENT_LIMIT).await
    }

    /// Seed the default admin row.
    pub async fn seed_admin(&self, login: &AdminLogin) -> Result<(), LedgerError> {
        self.admins.ensure_admin(login).await
    }
}
