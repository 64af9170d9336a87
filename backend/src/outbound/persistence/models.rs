//! Internal Diesel row structs for the reservation API tables.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{admin_users, reservations};
use crate::domain::{LedgerReservation, NewLedgerReservation};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReservationRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ReservationRow> for LedgerReservation {
    fn from(row: ReservationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            date: row.date,
            special_requests: row.special_requests,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reservations)]
pub(crate) struct NewReservationRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub date: &'a str,
    pub special_requests: Option<&'a str>,
}

impl<'a> From<&'a NewLedgerReservation> for NewReservationRow<'a> {
    fn from(reservation: &'a NewLedgerReservation) -> Self {
        Self {
            name: &reservation.name,
            email: &reservation.email,
            phone: &reservation.phone,
            date: &reservation.date,
            special_requests: reservation.special_requests.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = admin_users)]
pub(crate) struct NewAdminUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}
