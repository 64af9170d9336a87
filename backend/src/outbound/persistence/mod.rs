//! PostgreSQL persistence for the standalone reservation API.
//!
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! internal; adapters translate them into domain types. Connections come from
//! a `diesel-async` bb8 pool. The schema ships as embedded migrations, and an
//! embedded PostgreSQL instance can stand in for an external server.

mod diesel_reservation_ledger;
mod embedded;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_reservation_ledger::DieselReservationLedger;
pub use embedded::{EmbeddedDatabase, EmbeddedDatabaseError};
pub use migrations::{MIGRATIONS, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
