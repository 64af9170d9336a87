//! Guest sign-in handler.
//!
//! ```text
//! POST /api/v1/guest/verify {"guestCode":"3362","clientName":"Acme Corp"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, GuestSignIn, VerificationOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{FeedbackDto, PendingAgreementDto};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_guest_sign_in_error;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestVerifyRequest {
    #[schema(example = "3362")]
    pub guest_code: String,
    #[schema(example = "Acme Corp")]
    pub client_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestVerifyResponse {
    /// `proceed_to_agreement`, `name_mismatch` or `code_invalid`.
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<PendingAgreementDto>,
    pub feedback: FeedbackDto,
}

/// Check a guest code and name against the company records.
///
/// A match stores the pending agreement in the session. Mismatches leave any
/// earlier pending agreement untouched.
#[utoipa::path(
    post,
    path = "/api/v1/guest/verify",
    request_body = GuestVerifyRequest,
    responses(
        (status = 200, description = "Verification outcome", body = GuestVerifyResponse),
        (status = 400, description = "Missing field", body = Error)
    ),
    tags = ["guest"],
    operation_id = "verifyGuest",
    security([])
)]
#[post("/guest/verify")]
pub async fn verify_guest(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GuestVerifyRequest>,
) -> ApiResult<web::Json<GuestVerifyResponse>> {
    let request = payload.into_inner();
    let sign_in = GuestSignIn::try_from_parts(&request.guest_code, &request.client_name)
        .map_err(|err| map_guest_sign_in_error(&err))?;

    let outcome = state.guests.verify(&sign_in).await;
    debug!(outcome = outcome.label(), "guest verification finished");
    let agreement = match &outcome {
        VerificationOutcome::ProceedToAgreement(pending) => {
            session.begin_agreement(pending)?;
            Some(PendingAgreementDto::from(pending))
        }
        VerificationOutcome::NameMismatch | VerificationOutcome::CodeInvalid => None,
    };

    Ok(web::Json(GuestVerifyResponse {
        outcome: outcome.label().to_owned(),
        agreement,
        feedback: FeedbackDto::from(&outcome.feedback()),
    }))
}
