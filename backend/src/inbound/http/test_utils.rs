//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{
    MockAgreementCommand, MockCompanyIntakeCommand, MockGuestVerification, MockListingQuery,
    MockReservationIntakeCommand, MockStaffLoginService,
};
use crate::inbound::http::session::STAFF_ID_KEY;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mock ports for handler tests; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub staff_login: MockStaffLoginService,
    pub guests: MockGuestVerification,
    pub agreements: MockAgreementCommand,
    pub company_intake: MockCompanyIntakeCommand,
    pub reservations: MockReservationIntakeCommand,
    pub listing: MockListingQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            staff_login: Arc::new(self.staff_login),
            guests: Arc::new(self.guests),
            agreements: Arc::new(self.agreements),
            company_intake: Arc::new(self.company_intake),
            reservations: Arc::new(self.reservations),
            listing: Arc::new(self.listing),
        }
    }
}

/// Session cookie set by `res`.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Test-only route handler that marks the session as signed-in staff.
pub async fn staff_sign_in(session: Session) -> HttpResponse {
    match session.insert(STAFF_ID_KEY, "staff-1") {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}
