//! Intake server entry-point: loads settings, wires the record store and
//! serves the REST endpoints and OpenAPI docs.

mod server;

use std::env;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use intake::inbound::http::health::HealthState;
use intake::inbound::http::session_config::{BuildMode, session_settings};
use ortho_config::OrthoConfig;
use server::{IntakeSettings, ServerConfig, create_server};

/// Application bootstrap.
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

    let settings = IntakeSettings::load_from_iter(env::args_os())
        .map_err(|err| eyre!("failed to load intake settings: {err}"))?;
    let session = session_settings(&settings.session_inputs(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let record_store = settings
        .record_store_choice()
        .wrap_err("invalid record store URL")?;

    let bind_addr = settings.bind_addr();
    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_record_store(record_store);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start intake server")?;
    info!(%bind_addr, "intake server listening");
    server.await.wrap_err("intake server stopped with an error")
}
