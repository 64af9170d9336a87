//! Embedded Diesel migrations for the reservation API schema.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::LedgerError;

/// Migrations from `backend/migrations`, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations on a blocking thread.
///
/// # Errors
///
/// Returns [`LedgerError::Connection`] when the database cannot be reached and
/// [`LedgerError::Query`] when a migration fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), LedgerError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url)
            .map_err(|err| LedgerError::connection(err.to_string()))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| LedgerError::query(format!("migration: {err}")))?;
        info!(count = applied.len(), "migrations applied");
        Ok(())
    })
    .await
    .map_err(|err| LedgerError::query(format!("migration task failed: {err}")))?
}
