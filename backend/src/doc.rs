//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every intake endpoint under `/api/v1`, the health
//! probes, the response DTOs, and the session cookie security scheme. The
//! standalone reservation API keeps its legacy contract and is not
//! documented here.
//!
//! The generated specification is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::agreements::AgreementResponse;
use crate::inbound::http::company_records::{
    CompanyFormResponse, CompanyRecordRequest, CompanyRecordResponse,
};
use crate::inbound::http::dto::{
    AgreementDto, CompanyRecordDto, FeedbackDto, NavigationDto, NoticeDto, PendingAgreementDto,
    ReservationDto,
};
use crate::inbound::http::guest::{GuestVerifyRequest, GuestVerifyResponse};
use crate::inbound::http::listing::{ListingResponse, ListingRowDto};
use crate::inbound::http::reservations::{
    ReservationPageResponse, ReservationRequest, ReservationResponse,
};
use crate::inbound::http::staff::StaffLoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/staff/login.",
            ))),
        );
    }
}

/// OpenAPI document for the intake API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Intake backend API",
        description = "Guest verification, retainer agreements, staff company intake and reservations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::staff::staff_login,
        crate::inbound::http::staff::staff_logout,
        crate::inbound::http::reservations::create_reservation,
        crate::inbound::http::reservations::list_reservations,
        crate::inbound::http::company_records::open_company_form,
        crate::inbound::http::company_records::create_company_record,
        crate::inbound::http::guest::verify_guest,
        crate::inbound::http::agreements::view_agreement,
        crate::inbound::http::agreements::sign_agreement,
        crate::inbound::http::listing::get_listing,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        FeedbackDto,
        NoticeDto,
        NavigationDto,
        CompanyRecordDto,
        AgreementDto,
        ReservationDto,
        PendingAgreementDto,
        StaffLoginRequest,
        ReservationRequest,
        ReservationResponse,
        ReservationPageResponse,
        CompanyFormResponse,
        CompanyRecordRequest,
        CompanyRecordResponse,
        GuestVerifyRequest,
        GuestVerifyResponse,
        AgreementResponse,
        ListingRowDto,
        ListingResponse,
    )),
    tags(
        (name = "staff", description = "Staff session management"),
        (name = "reservations", description = "Public reservation form and staff pages"),
        (name = "company-records", description = "Staff company record intake"),
        (name = "guest", description = "Guest code verification"),
        (name = "agreement", description = "Retainer agreement signing"),
        (name = "listing", description = "Staff listing view"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
