//! Public reservation form and the staff reservation pages.
//!
//! ```text
//! POST /api/v1/reservations {"name":"Jo","email":"jo@example.com","phone":"555 0100"}
//! GET  /api/v1/reservations?page=2
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, ReservationDraft, ReservationPage};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{FeedbackDto, ReservationDto};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_reservation_draft_error;

/// Reservation form body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub name: String,
    #[schema(example = "jo@example.com")]
    pub email: String,
    #[schema(example = "+1 (555) 010-0100")]
    pub phone: String,
    #[serde(default)]
    pub special_requests: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    /// Always `received`.
    pub outcome: String,
    pub record: ReservationDto,
    pub feedback: FeedbackDto,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReservationPageQuery {
    /// 1-based page number; out-of-range values are clamped.
    pub page: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPageResponse {
    pub reservations: Vec<ReservationDto>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl From<&ReservationPage> for ReservationPageResponse {
    fn from(page: &ReservationPage) -> Self {
        Self {
            reservations: page.reservations.iter().map(ReservationDto::from).collect(),
            page: page.page,
            total_pages: page.total_pages,
            total: page.total,
        }
    }
}

/// Submit the public reservation form.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    request_body = ReservationRequest,
    responses(
        (status = 201, description = "Reservation stored", body = ReservationResponse),
        (status = 400, description = "Invalid reservation", body = Error),
        (status = 503, description = "Record store unavailable", body = Error)
    ),
    tags = ["reservations"],
    operation_id = "createReservation",
    security([])
)]
#[post("/reservations")]
pub async fn create_reservation(
    state: web::Data<HttpState>,
    payload: web::Json<ReservationRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let draft = ReservationDraft::try_from_parts(
        &request.name,
        &request.email,
        &request.phone,
        request.special_requests.as_deref().unwrap_or_default(),
    )
    .map_err(|err| map_reservation_draft_error(&err))?;

    let receipt = state.reservations.submit(&draft).await?;
    Ok(HttpResponse::Created().json(ReservationResponse {
        outcome: "received".to_owned(),
        record: ReservationDto::from(&receipt.record),
        feedback: FeedbackDto::from(&receipt.feedback()),
    }))
}

/// Page through the most recent reservations.
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    params(ReservationPageQuery),
    responses(
        (status = 200, description = "Reservation page", body = ReservationPageResponse),
        (status = 401, description = "Staff login required", body = Error),
        (status = 503, description = "Record store unavailable", body = Error)
    ),
    tags = ["reservations"],
    operation_id = "listReservations"
)]
#[get("/reservations")]
pub async fn list_reservations(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ReservationPageQuery>,
) -> ApiResult<web::Json<ReservationPageResponse>> {
    session.require_staff()?;
    let page = state
        .reservations
        .recent_page(query.page.unwrap_or(1))
        .await?;
    Ok(web::Json(ReservationPageResponse::from(&page)))
}
