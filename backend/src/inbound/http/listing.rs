//! Staff listing view.
//!
//! ```text
//! GET /api/v1/listing
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, ListingRow, ListingView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CompanyRecordDto, ReservationDto};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Company record joined to the date its agreement was signed.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingRowDto {
    #[serde(flatten)]
    pub record: CompanyRecordDto,
    /// Absent until the client signs.
    pub signed_at: Option<DateTime<Utc>>,
}

impl From<&ListingRow> for ListingRowDto {
    fn from(row: &ListingRow) -> Self {
        Self {
            record: CompanyRecordDto::from(&row.record),
            signed_at: row.signed_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub company_records: Vec<ListingRowDto>,
    pub reservations: Vec<ReservationDto>,
}

impl From<&ListingView> for ListingResponse {
    fn from(view: &ListingView) -> Self {
        Self {
            company_records: view.company_records.iter().map(ListingRowDto::from).collect(),
            reservations: view.reservations.iter().map(ReservationDto::from).collect(),
        }
    }
}

/// Recent company records with signing dates, plus recent reservations.
#[utoipa::path(
    get,
    path = "/api/v1/listing",
    responses(
        (status = 200, description = "Listing view", body = ListingResponse),
        (status = 401, description = "Staff login required", body = Error),
        (status = 503, description = "Record store unavailable", body = Error)
    ),
    tags = ["listing"],
    operation_id = "getListing"
)]
#[get("/listing")]
pub async fn get_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ListingResponse>> {
    session.require_staff()?;
    let view = state.listing.listing().await?;
    Ok(web::Json(ListingResponse::from(&view)))
}
