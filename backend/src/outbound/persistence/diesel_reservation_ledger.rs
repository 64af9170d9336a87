//! PostgreSQL-backed `ReservationLedger` and `AdminCredentials` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AdminCredentials, LedgerError, ReservationLedger};
use crate::domain::{AdminLogin, LedgerReservation, NewLedgerReservation};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewAdminUserRow, NewReservationRow, ReservationRow};
use super::pool::DbPool;
use super::schema::{admin_users, reservations};

/// Diesel adapter for the reservation API tables.
#[derive(Clone)]
pub struct DieselReservationLedger {
    pool: DbPool,
}

impl DieselReservationLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationLedger for DieselReservationLedger {
    async fn insert(&self, reservation: &NewLedgerReservation) -> Result<(), LedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(reservations::table)
            .values(NewReservationRow::from(reservation))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<LedgerReservation>, LedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReservationRow> = reservations::table
            .order((reservations::created_at.desc(), reservations::id.desc()))
            .limit(limit)
            .select(ReservationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(LedgerReservation::from).collect())
    }
}

#[async_trait]
impl AdminCredentials for DieselReservationLedger {
    async fn matches(&self, login: &AdminLogin) -> Result<bool, LedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            admin_users::table
                .filter(admin_users::username.eq(&login.username))
                .filter(admin_users::password_hash.eq(&login.password_hash)),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn ensure_admin(&self, login: &AdminLogin) -> Result<(), LedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(admin_users::table)
            .values(NewAdminUserRow {
                username: &login.username,
                password_hash: &login.password_hash,
            })
            .on_conflict(admin_users::username)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
