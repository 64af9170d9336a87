//! Staff company record intake.
//!
//! ```text
//! GET  /api/v1/company-records/form
//! POST /api/v1/company-records {"mainCode":"3362","clientName":"Acme Corp","serviceProvided":"Incorporation"}
//! ```
//!
//! Opening the form starts a new view instance; its submission latch lives
//! in the session until the form is opened again.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CompanyIntakeOutcome, CompanyRecordDraft, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CompanyRecordDto, FeedbackDto};
use crate::inbound::http::session::{LatchSlot, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_company_draft_error;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFormResponse {
    /// Most recently issued main code, shown as a hint.
    pub previous_main_code: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecordRequest {
    #[schema(example = "3362")]
    pub main_code: String,
    #[schema(example = "Acme Corp")]
    pub client_name: String,
    #[schema(example = "Incorporation")]
    pub service_provided: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecordResponse {
    /// `saved`, `duplicate` or `already_submitted`.
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<CompanyRecordDto>,
    pub feedback: FeedbackDto,
}

/// Open the intake form.
#[utoipa::path(
    get,
    path = "/api/v1/company-records/form",
    responses(
        (status = 200, description = "Fresh form state", body = CompanyFormResponse),
        (status = 401, description = "Staff login required", body = Error)
    ),
    tags = ["company-records"],
    operation_id = "openCompanyForm"
)]
#[get("/company-records/form")]
pub async fn open_company_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CompanyFormResponse>> {
    session.require_staff()?;
    session.reset_latch(LatchSlot::CompanyForm);
    let form = state.company_intake.open_form().await;
    Ok(web::Json(CompanyFormResponse {
        previous_main_code: form.previous_main_code,
    }))
}

/// Create a company record unless its main code is taken.
#[utoipa::path(
    post,
    path = "/api/v1/company-records",
    request_body = CompanyRecordRequest,
    responses(
        (status = 201, description = "Record saved", body = CompanyRecordResponse),
        (status = 200, description = "This form instance already submitted", body = CompanyRecordResponse),
        (status = 400, description = "Missing field", body = Error),
        (status = 401, description = "Staff login required", body = Error),
        (status = 409, description = "Main code already exists", body = CompanyRecordResponse),
        (status = 503, description = "Record store unavailable", body = Error)
    ),
    tags = ["company-records"],
    operation_id = "createCompanyRecord"
)]
#[post("/company-records")]
pub async fn create_company_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CompanyRecordRequest>,
) -> ApiResult<HttpResponse> {
    session.require_staff()?;
    let request = payload.into_inner();
    let draft = CompanyRecordDraft::try_from_parts(
        &request.main_code,
        &request.client_name,
        &request.service_provided,
    )
    .map_err(|err| map_company_draft_error(&err))?;

    let mut latch = session.latch(LatchSlot::CompanyForm)?;
    let outcome = state.company_intake.submit(&draft, &mut latch).await?;
    session.store_latch(LatchSlot::CompanyForm, latch)?;

    let body = CompanyRecordResponse {
        outcome: outcome.label().to_owned(),
        record: match &outcome {
            CompanyIntakeOutcome::Saved(record) => Some(CompanyRecordDto::from(record)),
            CompanyIntakeOutcome::Duplicate | CompanyIntakeOutcome::AlreadySubmitted => None,
        },
        feedback: FeedbackDto::from(&outcome.feedback()),
    };
    Ok(match outcome {
        CompanyIntakeOutcome::Saved(_) => HttpResponse::Created().json(body),
        CompanyIntakeOutcome::Duplicate => HttpResponse::Conflict().json(body),
        CompanyIntakeOutcome::AlreadySubmitted => HttpResponse::Ok().json(body),
    })
}
