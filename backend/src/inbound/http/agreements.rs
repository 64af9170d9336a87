//! Retainer agreement view and signing.
//!
//! ```text
//! GET  /api/v1/agreement
//! POST /api/v1/agreement
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{AgreementOutcome, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{AgreementDto, FeedbackDto, PendingAgreementDto};
use crate::inbound::http::session::{LatchSlot, SessionContext};
use crate::inbound::http::state::HttpState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgreementResponse {
    /// `signed`, `duplicate` or `already_submitted`.
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AgreementDto>,
    pub feedback: FeedbackDto,
}

/// Show the agreement awaiting signature. Each view starts a new instance.
#[utoipa::path(
    get,
    path = "/api/v1/agreement",
    responses(
        (status = 200, description = "Pending agreement", body = PendingAgreementDto),
        (status = 404, description = "No agreement is pending", body = Error)
    ),
    tags = ["agreement"],
    operation_id = "viewAgreement",
    security([])
)]
#[get("/agreement")]
pub async fn view_agreement(session: SessionContext) -> ApiResult<web::Json<PendingAgreementDto>> {
    let pending = session.require_pending_agreement()?;
    session.reset_latch(LatchSlot::Agreement);
    Ok(web::Json(PendingAgreementDto::from(&pending)))
}

/// Sign the pending agreement.
#[utoipa::path(
    post,
    path = "/api/v1/agreement",
    responses(
        (status = 201, description = "Agreement signed", body = AgreementResponse),
        (status = 200, description = "This view already submitted", body = AgreementResponse),
        (status = 404, description = "No agreement is pending", body = Error),
        (status = 409, description = "Client already signed", body = AgreementResponse),
        (status = 503, description = "Record store unavailable", body = Error)
    ),
    tags = ["agreement"],
    operation_id = "signAgreement",
    security([])
)]
#[post("/agreement")]
pub async fn sign_agreement(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let pending = session.require_pending_agreement()?;
    let mut latch = session.latch(LatchSlot::Agreement)?;
    let outcome = state.agreements.sign(&pending, &mut latch).await?;
    session.store_latch(LatchSlot::Agreement, latch)?;

    let body = AgreementResponse {
        outcome: outcome.label().to_owned(),
        record: match &outcome {
            AgreementOutcome::Signed(record) => Some(AgreementDto::from(record)),
            AgreementOutcome::Duplicate | AgreementOutcome::AlreadySubmitted => None,
        },
        feedback: FeedbackDto::from(&outcome.feedback()),
    };
    Ok(match outcome {
        AgreementOutcome::Signed(_) => HttpResponse::Created().json(body),
        AgreementOutcome::Duplicate => HttpResponse::Conflict().json(body),
        AgreementOutcome::AlreadySubmitted => HttpResponse::Ok().json(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PendingAgreement, Record, agreement_from_pending};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::Utc;
    use serde_json::Value;

    fn pending() -> PendingAgreement {
        PendingAgreement {
            client_name: "Acme Corp".to_owned(),
            service_provided: "Incorporation".to_owned(),
            guest_code: "3362".to_owned(),
            created: Utc::now(),
        }
    }

    async fn verified(session: Session) -> HttpResponse {
        match SessionContext::new(session).begin_agreement(&pending()) {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    fn test_app(
        ports: MockPorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .wrap(test_session_middleware())
            .route("/test/verified", web::post().to(verified))
            .service(
                web::scope("/api/v1")
                    .service(view_agreement)
                    .service(sign_agreement),
            )
    }

    fn latching_ports() -> MockPorts {
        let mut ports = MockPorts::default();
        ports.agreements.expect_sign().returning(|pending, latch| {
            if latch.is_set() {
                return Ok(AgreementOutcome::AlreadySubmitted);
            }
            latch.set();
            Ok(AgreementOutcome::Signed(Record {
                id: "a1".to_owned(),
                created: Utc::now(),
                fields: agreement_from_pending(pending),
            }))
        });
        ports
    }

    #[actix_web::test]
    async fn agreement_needs_verification() {
        let app = actix_test::init_service(test_app(MockPorts::default())).await;
        for req in [
            actix_test::TestRequest::get().uri("/api/v1/agreement"),
            actix_test::TestRequest::post().uri("/api/v1/agreement"),
        ] {
            let res = actix_test::call_service(&app, req.to_request()).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND);
        }
    }

    #[actix_web::test]
    async fn view_shows_pending_details() {
        let app = actix_test::init_service(test_app(MockPorts::default())).await;
        let verified = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/test/verified").to_request(),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/agreement")
                .cookie(session_cookie(&verified))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            value.get("clientName").and_then(Value::as_str),
            Some("Acme Corp")
        );
        assert_eq!(value.get("guestCode").and_then(Value::as_str), Some("3362"));
    }

    #[actix_web::test]
    async fn signing_twice_from_one_view_writes_once() {
        let app = actix_test::init_service(test_app(latching_ports())).await;
        let verified = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/test/verified").to_request(),
        )
        .await;

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/agreement")
                .cookie(session_cookie(&verified))
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);
        let latched = session_cookie(&first);
        let body: Value = actix_test::read_body_json(first).await;
        assert_eq!(body.pointer("/record/mainCode").and_then(Value::as_str), Some("3362"));
        assert_eq!(
            body.pointer("/feedback/navigation/target").and_then(Value::as_str),
            Some("home")
        );

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/agreement")
                .cookie(latched)
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(second).await;
        assert_eq!(
            body.get("outcome").and_then(Value::as_str),
            Some("already_submitted")
        );
    }

    #[actix_web::test]
    async fn duplicate_signature_is_a_conflict() {
        let mut ports = MockPorts::default();
        ports
            .agreements
            .expect_sign()
            .returning(|_, _| Ok(AgreementOutcome::Duplicate));
        let app = actix_test::init_service(test_app(ports)).await;
        let verified = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/test/verified").to_request(),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/agreement")
                .cookie(session_cookie(&verified))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }
}
