//! Standalone reservation API: admin login plus reservation create/list over
//! PostgreSQL.
//!
//! Without `RESERVATION_API_DATABASE_URL` an embedded cluster is installed
//! and started for the lifetime of the process.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use intake::Trace;
use intake::domain::{AdminLogin, ReservationApiService};
use intake::inbound::http::reservation_api::configure;
use intake::outbound::persistence::{
    DbPool, DieselReservationLedger, EmbeddedDatabase, PoolConfig, run_pending_migrations,
};

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3001);
const DEFAULT_DATABASE_NAME: &str = "reservations";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Settings for the reservation API, loaded from CLI and
/// `RESERVATION_API_*` environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RESERVATION_API")]
struct ReservationApiSettings {
    /// Socket address to listen on.
    bind_addr: Option<SocketAddr>,
    /// External PostgreSQL URL. An embedded cluster is used when absent.
    database_url: Option<String>,
    /// Database created inside the embedded cluster.
    database_name: Option<String>,
    /// Admin account seeded at startup.
    admin_username: Option<String>,
    admin_password: Option<String>,
}

impl ReservationApiSettings {
    fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    fn database_name(&self) -> &str {
        self.database_name.as_deref().unwrap_or(DEFAULT_DATABASE_NAME)
    }

    fn admin(&self) -> AdminLogin {
        AdminLogin {
            username: self
                .admin_username
                .clone()
                .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_owned()),
            password_hash: self
                .admin_password
                .clone()
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_owned()),
        }
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ReservationApiSettings::load_from_iter(env::args_os())
        .map_err(|err| eyre!("failed to load reservation API settings: {err}"))?;

    let (database_url, embedded) = match settings.database_url.clone() {
        Some(url) => (url, None),
        None => {
            let database = EmbeddedDatabase::start(settings.database_name())
                .await
                .wrap_err("failed to start embedded postgres")?;
            (database.database_url().to_owned(), Some(database))
        }
    };

    let outcome = serve(&settings, &database_url).await;

    if let Some(database) = embedded {
        if let Err(err) = database.stop().await {
            warn!(error = %err, "embedded postgres did not stop cleanly");
        }
    }
    outcome
}

async fn serve(settings: &ReservationApiSettings, database_url: &str) -> Result<()> {
    run_pending_migrations(database_url)
        .await
        .wrap_err("failed to apply migrations")?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("failed to build connection pool")?;
    let ledger = Arc::new(DieselReservationLedger::new(pool));
    let service = ReservationApiService::new(ledger.clone(), ledger);
    service
        .seed_admin(&settings.admin())
        .await
        .wrap_err("failed to seed admin account")?;

    let service = web::Data::new(service);
    let bind_addr = settings.bind_addr();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Trace)
            .configure(configure)
    })
    .bind(bind_addr)
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?
    .run();

    info!(%bind_addr, "reservation API listening");
    server.await.wrap_err("reservation API stopped with an error")
}
