//! Staff session handlers.
//!
//! ```text
//! POST /api/v1/staff/login {"username":"clerk@firm.test","password":"s3cret"}
//! POST /api/v1/staff/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_login_validation_error;

/// Login request body for `POST /api/v1/staff/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffLoginRequest {
    #[schema(example = "clerk@firm.test")]
    pub username: String,
    pub password: String,
}

impl TryFrom<StaffLoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: StaffLoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Authenticate staff against the record store and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/staff/login",
    request_body = StaffLoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Record store unavailable", body = Error)
    ),
    tags = ["staff"],
    operation_id = "staffLogin",
    security([])
)]
#[post("/staff/login")]
pub async fn staff_login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<StaffLoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|err| map_login_validation_error(&err))?;
    let staff_id = state.staff_login.authenticate(&credentials).await?;
    session.persist_staff(&staff_id)?;
    info!(staff_id = %staff_id, "staff session started");
    Ok(HttpResponse::Ok().finish())
}

/// End the staff session. Guest view state in the same cookie is kept.
#[utoipa::path(
    post,
    path = "/api/v1/staff/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["staff"],
    operation_id = "staffLogout"
)]
#[post("/staff/logout")]
pub async fn staff_logout(session: SessionContext) -> HttpResponse {
    session.clear_staff();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StaffId;
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, get, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[get("/whoami")]
    async fn whoami(session: SessionContext) -> ApiResult<HttpResponse> {
        let id = session.require_staff()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
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
            .service(
                web::scope("/api/v1")
                    .service(staff_login)
                    .service(staff_logout)
                    .service(whoami),
            )
    }

    fn accepting_ports() -> MockPorts {
        let mut ports = MockPorts::default();
        ports
            .staff_login
            .expect_authenticate()
            .returning(|creds| {
                if creds.password() == "s3cret" {
                    StaffId::new("staff-1").map_err(|_| Error::internal("bad fixture"))
                } else {
                    Err(Error::unauthorized("invalid credentials"))
                }
            });
        ports
    }

    #[actix_web::test]
    async fn login_then_logout_round_trip() {
        let app = actix_test::init_service(test_app(accepting_ports())).await;

        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/staff/login")
                .set_json(json!({"username": "clerk", "password": "s3cret"}))
                .to_request(),
        )
        .await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = session_cookie(&login_res);

        let who = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/whoami")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(who.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(who).await, "staff-1");

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/staff/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
        let cleared = session_cookie(&logout_res);

        let after = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/whoami")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorised() {
        let app = actix_test::init_service(test_app(accepting_ports())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/staff/login")
                .set_json(json!({"username": "clerk", "password": "nope"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case("   ", "s3cret", "username", "empty_username")]
    #[case("clerk", "", "password", "empty_password")]
    #[actix_web::test]
    async fn blank_credentials_are_rejected_before_the_store(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = actix_test::init_service(test_app(MockPorts::default())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/staff/login")
                .set_json(json!({"username": username, "password": password}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            value.pointer("/details/field").and_then(Value::as_str),
            Some(field)
        );
        assert_eq!(
            value.pointer("/details/code").and_then(Value::as_str),
            Some(code)
        );
    }
}
