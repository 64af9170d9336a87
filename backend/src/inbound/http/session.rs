//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie session carries all per-browser view state: the staff id, the
//! pending agreement produced by guest verification, and one submission
//! latch per view. Workers share nothing else.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, PendingAgreement, StaffId, SubmissionLatch};

pub(crate) const STAFF_ID_KEY: &str = "staff_id";
pub(crate) const PENDING_AGREEMENT_KEY: &str = "pending_agreement";

/// View instances that own a submission latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchSlot {
    Agreement,
    CompanyForm,
}

impl LatchSlot {
    const fn key(self) -> &'static str {
        match self {
            Self::Agreement => "agreement_latch",
            Self::CompanyForm => "company_form_latch",
        }
    }
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

fn write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated staff id in the session cookie.
    pub fn persist_staff(&self, staff_id: &StaffId) -> Result<(), Error> {
        self.0
            .insert(STAFF_ID_KEY, staff_id.as_ref())
            .map_err(write_error)
    }

    /// Drop the staff id. Guest view state is kept.
    pub fn clear_staff(&self) {
        self.0.remove(STAFF_ID_KEY);
    }

    /// Fetch the current staff id from the session, if present.
    pub fn staff_id(&self) -> Result<Option<StaffId>, Error> {
        let id = self.0.get::<String>(STAFF_ID_KEY).map_err(read_error)?;
        match id {
            Some(raw) => match StaffId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    warn!("invalid staff id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require a staff session or return `401 Unauthorized`.
    pub fn require_staff(&self) -> Result<StaffId, Error> {
        self.staff_id()?
            .ok_or_else(|| Error::unauthorized("staff login required"))
    }

    /// Store a freshly verified agreement and start a new agreement view.
    pub fn begin_agreement(&self, pending: &PendingAgreement) -> Result<(), Error> {
        self.0
            .insert(PENDING_AGREEMENT_KEY, pending)
            .map_err(write_error)?;
        self.reset_latch(LatchSlot::Agreement);
        Ok(())
    }

    /// The agreement awaiting signature, if verification succeeded.
    ///
    /// An undecodable value is treated as absent.
    pub fn pending_agreement(&self) -> Option<PendingAgreement> {
        match self.0.get::<PendingAgreement>(PENDING_AGREEMENT_KEY) {
            Ok(pending) => pending,
            Err(error) => {
                warn!(%error, "invalid pending agreement in session cookie");
                None
            }
        }
    }

    /// Require a pending agreement or return `404 Not Found`.
    pub fn require_pending_agreement(&self) -> Result<PendingAgreement, Error> {
        self.pending_agreement()
            .ok_or_else(|| Error::not_found("no agreement is pending"))
    }

    /// Latch for the current instance of `slot`; a missing latch is clear.
    pub fn latch(&self, slot: LatchSlot) -> Result<SubmissionLatch, Error> {
        Ok(self
            .0
            .get::<SubmissionLatch>(slot.key())
            .map_err(read_error)?
            .unwrap_or_default())
    }

    pub fn store_latch(&self, slot: LatchSlot, latch: SubmissionLatch) -> Result<(), Error> {
        self.0.insert(slot.key(), latch).map_err(write_error)
    }

    /// Start a new view instance for `slot`.
    pub fn reset_latch(&self, slot: LatchSlot) {
        self.0.remove(slot.key());
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use chrono::{TimeZone, Utc};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().wrap(crate::inbound::http::test_utils::test_session_middleware())
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(Cookie::into_owned)
            .expect("session cookie set")
    }

    fn pending() -> PendingAgreement {
        PendingAgreement {
            client_name: "Acme Corp".to_owned(),
            service_provided: "Incorporation".to_owned(),
            guest_code: "3362".to_owned(),
            created: Utc
                .with_ymd_and_hms(2025, 6, 1, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[actix_web::test]
    async fn round_trips_staff_id() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let id = StaffId::new("staff:clerk").expect("fixture id");
                        session.persist_staff(&id)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session.require_staff()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "staff:clerk");
    }

    #[actix_web::test]
    async fn missing_staff_is_unauthorised() {
        let app = test::init_service(session_test_app().route(
            "/require",
            web::get().to(|session: SessionContext| async move {
                session.require_staff()?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn blank_staff_id_is_unauthorised() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(STAFF_ID_KEY, "   ")
                            .expect("set invalid staff id");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/require",
                    web::get().to(|session: SessionContext| async move {
                        session.require_staff()?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn beginning_an_agreement_resets_its_latch() {
        let app = test::init_service(
            session_test_app()
                .route(
                    "/latch",
                    web::get().to(|session: SessionContext| async move {
                        let mut latch = session.latch(LatchSlot::Agreement)?;
                        latch.set();
                        session.store_latch(LatchSlot::Agreement, latch)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/begin",
                    web::get().to(|session: SessionContext| async move {
                        session.begin_agreement(&pending())?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/state",
                    web::get().to(|session: SessionContext| async move {
                        let latch = session.latch(LatchSlot::Agreement)?;
                        let agreement = session.require_pending_agreement()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(format!(
                            "{}:{}",
                            agreement.guest_code,
                            latch.is_set()
                        )))
                    }),
                ),
        )
        .await;

        let latch_res =
            test::call_service(&app, test::TestRequest::get().uri("/latch").to_request()).await;
        let begin_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/begin")
                .cookie(session_cookie(&latch_res))
                .to_request(),
        )
        .await;
        let state_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/state")
                .cookie(session_cookie(&begin_res))
                .to_request(),
        )
        .await;
        assert_eq!(state_res.status(), StatusCode::OK);
        let body = test::read_body(state_res).await;
        assert_eq!(body, "3362:false");
    }

    #[actix_web::test]
    async fn missing_pending_agreement_is_not_found() {
        let app = test::init_service(session_test_app().route(
            "/agreement",
            web::get().to(|session: SessionContext| async move {
                session.require_pending_agreement()?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/agreement").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
