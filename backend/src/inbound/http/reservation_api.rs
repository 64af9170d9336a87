//! Handlers for the standalone reservation API binary.
//!
//! ```text
//! POST /api/admin/login   {"username":"admin","password_hash":"admin123"}
//! POST /api/reservations  {"name":"Jo","email":"jo@x.io","phone":"1","date":"2025-06-01"}
//! GET  /api/reservations
//! ```
//!
//! Bodies keep the legacy shapes (`{success}` / `{error}`) rather than the
//! intake API's error envelope.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::error;

use crate::domain::{AdminLogin, AdminLoginOutcome, NewLedgerReservation, ReservationApiService};

#[derive(Debug, Serialize)]
struct LoginBody {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct SuccessBody {
    success: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Mount the reservation API routes.
///
/// Bodies that fail to deserialize answer with the route's legacy 500 body
/// instead of actix's plain-text 400.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/admin/login")
                    .app_data(web::JsonConfig::default().error_handler(login_body_rejected))
                    .route(web::post().to(admin_login)),
            )
            .service(
                web::resource("/reservations")
                    .app_data(
                        web::JsonConfig::default().error_handler(reservation_body_rejected),
                    )
                    .route(web::post().to(create_ledger_reservation))
                    .route(web::get().to(recent_ledger_reservations)),
            ),
    );
}

fn login_body_rejected(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    error!(error = %err, "login error");
    let response = HttpResponse::InternalServerError().json(LoginBody {
        success: false,
        error: Some("Server error"),
    });
    InternalError::from_response(err, response).into()
}

fn reservation_body_rejected(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    error!(error = %err, "reservation creation error");
    let response = HttpResponse::InternalServerError().json(ErrorBody {
        error: "Failed to create reservation",
    });
    InternalError::from_response(err, response).into()
}

/// `POST /api/admin/login`.
pub async fn admin_login(
    service: web::Data<ReservationApiService>,
    payload: web::Json<AdminLogin>,
) -> HttpResponse {
    match service.login(&payload).await {
        Ok(AdminLoginOutcome::Accepted) => HttpResponse::Ok().json(LoginBody {
            success: true,
            error: None,
        }),
        Ok(AdminLoginOutcome::Rejected) => HttpResponse::Unauthorized().json(LoginBody {
            success: false,
            error: Some("Invalid credentials"),
        }),
        Err(err) => {
            error!(error = %err, "login error");
            HttpResponse::InternalServerError().json(LoginBody {
                success: false,
                error: Some("Server error"),
            })
        }
    }
}

/// `POST /api/reservations`.
pub async fn create_ledger_reservation(
    service: web::Data<ReservationApiService>,
    payload: web::Json<NewLedgerReservation>,
) -> HttpResponse {
    match service.create(&payload).await {
        Ok(()) => HttpResponse::Ok().json(SuccessBody { success: true }),
        Err(err) => {
            error!(error = %err, "reservation creation error");
            HttpResponse::InternalServerError().json(ErrorBody {
                error: "Failed to create reservation",
            })
        }
    }
}

/// `GET /api/reservations`: the ten newest rows.
pub async fn recent_ledger_reservations(
    service: web::Data<ReservationApiService>,
) -> HttpResponse {
    match service.recent().await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(err) => {
            error!(error = %err, "fetch reservations error");
            HttpResponse::InternalServerError().json(ErrorBody {
                error: "Failed to fetch reservations",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LedgerReservation;
    use crate::domain::ports::{LedgerError, MockAdminCredentials, MockReservationLedger};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn service(
        ledger: MockReservationLedger,
        admins: MockAdminCredentials,
    ) -> web::Data<ReservationApiService> {
        web::Data::new(ReservationApiService::new(Arc::new(ledger), Arc::new(admins)))
    }

    #[rstest]
    #[case(Ok(true), StatusCode::OK, json!({"success": true}))]
    #[case(Ok(false), StatusCode::UNAUTHORIZED, json!({"success": false, "error": "Invalid credentials"}))]
    #[case(Err(()), StatusCode::INTERNAL_SERVER_ERROR, json!({"success": false, "error": "Server error"}))]
    #[actix_web::test]
    async fn login_reports_legacy_bodies(
        #[case] matched: Result<bool, ()>,
        #[case] status: StatusCode,
        #[case] expected: Value,
    ) {
        let mut admins = MockAdminCredentials::new();
        admins.expect_matches().returning(move |_| {
            matched.map_err(|()| LedgerError::connection("pool exhausted"))
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(service(MockReservationLedger::new(), admins))
                .configure(configure),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/admin/login")
                .set_json(json!({"username": "admin", "password_hash": "admin123"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), status);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, expected);
    }

    #[actix_web::test]
    async fn create_failure_uses_legacy_error() {
        let mut ledger = MockReservationLedger::new();
        ledger
            .expect_insert()
            .returning(|_| Err(LedgerError::query("constraint violated")));
        let app = actix_test::init_service(
            App::new()
                .app_data(service(ledger, MockAdminCredentials::new()))
                .configure(configure),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/reservations")
                .set_json(json!({
                    "name": "Jo",
                    "email": "jo@x.io",
                    "phone": "1",
                    "date": "2025-06-01"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!({"error": "Failed to create reservation"}));
    }

    #[rstest]
    #[case::login_missing_password(
        "/api/admin/login",
        json!({"username": "admin"}),
        json!({"success": false, "error": "Server error"})
    )]
    #[case::reservation_missing_date(
        "/api/reservations",
        json!({"name": "Jo", "email": "a@b.co", "phone": "1"}),
        json!({"error": "Failed to create reservation"})
    )]
    #[case::reservation_wrong_type(
        "/api/reservations",
        json!({"name": "Jo", "email": "a@b.co", "phone": 1, "date": "2025-06-01"}),
        json!({"error": "Failed to create reservation"})
    )]
    #[actix_web::test]
    async fn rejected_bodies_use_legacy_errors(
        #[case] uri: &str,
        #[case] payload: Value,
        #[case] expected: Value,
    ) {
        let app = actix_test::init_service(
            App::new()
                .app_data(service(
                    MockReservationLedger::new(),
                    MockAdminCredentials::new(),
                ))
                .configure(configure),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(uri)
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, expected);
    }

    #[actix_web::test]
    async fn recent_rows_are_a_bare_array() {
        let mut ledger = MockReservationLedger::new();
        ledger.expect_recent().returning(|_| {
            Ok(vec![LedgerReservation {
                id: 7,
                name: "Jo".to_owned(),
                email: "jo@x.io".to_owned(),
                phone: "1".to_owned(),
                date: "2025-06-01".to_owned(),
                special_requests: None,
                created_at: Utc::now(),
            }])
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(service(ledger, MockAdminCredentials::new()))
                .configure(configure),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/reservations").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.pointer("/0/id").and_then(Value::as_i64), Some(7));
        assert_eq!(
            body.pointer("/0/special_requests"),
            Some(&Value::Null)
        );
    }
}
