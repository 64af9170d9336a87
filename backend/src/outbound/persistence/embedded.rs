//! Embedded PostgreSQL instance for running the reservation API without an
//! external database.

use postgresql_embedded::{PostgreSQL, Settings};
use tracing::info;

/// Errors raised while managing the embedded instance.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddedDatabaseError {
    #[error("embedded postgres {step} failed: {source}")]
    Lifecycle {
        step: &'static str,
        #[source]
        source: postgresql_embedded::Error,
    },
}

fn lifecycle(step: &'static str) -> impl FnOnce(postgresql_embedded::Error) -> EmbeddedDatabaseError {
    move |source| EmbeddedDatabaseError::Lifecycle { step, source }
}

/// A running embedded cluster with one application database.
pub struct EmbeddedDatabase {
    postgres: PostgreSQL,
    database_url: String,
}

impl EmbeddedDatabase {
    /// Install (if needed), start, and create `database_name`.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddedDatabaseError`] naming the failed lifecycle step.
    pub async fn start(database_name: &str) -> Result<Self, EmbeddedDatabaseError> {
        let mut postgres = PostgreSQL::new(Settings::default());
        postgres.setup().await.map_err(lifecycle("setup"))?;
        postgres.start().await.map_err(lifecycle("start"))?;

        let exists = postgres
            .database_exists(database_name)
            .await
            .map_err(lifecycle("database lookup"))?;
        if !exists {
            postgres
                .create_database(database_name)
                .await
                .map_err(lifecycle("create database"))?;
        }

        let database_url = postgres.settings().url(database_name);
        info!(port = postgres.settings().port, database = database_name, "embedded postgres started");
        Ok(Self {
            postgres,
            database_url,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Stop the cluster.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddedDatabaseError`] when shutdown fails.
    pub async fn stop(self) -> Result<(), EmbeddedDatabaseError> {
        self.postgres.stop().await.map_err(lifecycle("stop"))
    }
}
