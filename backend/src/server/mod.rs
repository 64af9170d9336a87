//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{IntakeSettings, RecordStoreChoice, ServerConfig};

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use intake::Trace;
#[cfg(debug_assertions)]
use intake::doc::ApiDoc;
use intake::inbound::http::agreements::{sign_agreement, view_agreement};
use intake::inbound::http::company_records::{create_company_record, open_company_form};
use intake::inbound::http::error::{json_error_handler, query_error_handler};
use intake::inbound::http::guest::verify_guest;
use intake::inbound::http::health::{HealthState, live, ready};
use intake::inbound::http::listing::get_listing;
use intake::inbound::http::reservations::{create_reservation, list_reservations};
use intake::inbound::http::staff::{staff_login, staff_logout};
use intake::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(staff_login)
        .service(staff_logout)
        .service(create_reservation)
        .service(list_reservations)
        .service(open_company_form)
        .service(create_company_record)
        .service(verify_guest)
        .service(view_agreement)
        .service(sign_agreement)
        .service(get_listing);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the record store client cannot be
/// built or binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let wiring = build_http_state(&config.record_store)?;
    health_state.track_store(wiring.records);
    let http_state = web::Data::new(wiring.http_state);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        record_store: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
