//! Domain primitives, flows and ports.
//!
//! Purpose: hold the intake rules independent of HTTP and storage. Flows
//! talk to the outside world only through [`ports`]; inbound adapters call
//! the driving ports and map [`Error`] into responses.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Record types: `CompanyRecord`, `Agreement`, `Reservation`, `StoredRecord`.
//! - Flows: guest verification, agreement signing, company and reservation
//!   intake, listing, and the standalone reservation API service.
//! - Feedback: timed notice and navigation directives.

pub mod agreement_submission;
pub mod auth;
pub mod client_name;
pub mod company_intake;
pub mod duplicate_guard;
pub mod error;
pub mod feedback;
pub mod guest_verification;
pub mod listing;
pub mod ports;
pub mod records;
pub mod reservation_api;
pub mod reservation_intake;
pub mod trace_id;

pub use self::agreement_submission::{
    AgreementOutcome, AgreementSubmissionService, agreement_from_pending,
};
pub use self::auth::{LoginCredentials, LoginValidationError, StaffId, StaffIdValidationError};
pub use self::client_name::{client_names_match, normalize_client_name};
pub use self::company_intake::{
    CompanyDraftError, CompanyIntakeForm, CompanyIntakeOutcome, CompanyIntakeService,
    CompanyRecordDraft,
};
pub use self::duplicate_guard::{DuplicateGuard, GuardOutcome, SubmissionLatch};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feedback::{Feedback, Navigation, Notice, NoticeKind, View};
pub use self::guest_verification::{
    GuestSignIn, GuestSignInError, GuestVerificationService, PendingAgreement,
    VerificationOutcome,
};
pub use self::listing::{ListingRow, ListingService, ListingView, join_signed_dates};
pub use self::records::{
    AGREEMENT_CLIENT_NAME_FIELD, Agreement, COMPANY_MAIN_CODE_FIELD, Collection, CompanyRecord,
    Record, RecordFields, Reservation, StoredRecord, encode_fields,
};
pub use self::reservation_api::{
    AdminLogin, AdminLoginOutcome, LedgerReservation, NewLedgerReservation,
    ReservationApiService,
};
pub use self::reservation_intake::{
    ReservationDraft, ReservationDraftError, ReservationIntakeService, ReservationPage,
    ReservationReceipt,
};
pub use self::trace_id::TraceId;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use intake::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
