//! Response DTOs shared by the intake handlers.
//!
//! Domain records and feedback directives stay free of serialisation
//! concerns; these types fix the wire shape. Durations are milliseconds.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    Agreement, CompanyRecord, Feedback, Navigation, Notice, PendingAgreement, Record, Reservation,
};

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Notice to display, with its auto-dismiss delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoticeDto {
    /// `banner`, `modal`, `inline` or `acknowledgement`.
    #[schema(example = "modal")]
    pub kind: String,
    pub message: String,
    #[schema(example = 5000)]
    pub dismiss_after_ms: u64,
}

impl From<&Notice> for NoticeDto {
    fn from(notice: &Notice) -> Self {
        Self {
            kind: notice.kind.as_str().to_owned(),
            message: notice.message.to_owned(),
            dismiss_after_ms: millis(notice.dismiss_after),
        }
    }
}

/// Delayed navigation the client should perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationDto {
    /// `home`, `guest_sign_in`, `agreement` or `code_error`.
    #[schema(example = "code_error")]
    pub target: String,
    #[schema(example = 1500)]
    pub after_ms: u64,
}

impl From<&Navigation> for NavigationDto {
    fn from(navigation: &Navigation) -> Self {
        Self {
            target: navigation.target.as_str().to_owned(),
            after_ms: millis(navigation.after),
        }
    }
}

/// Feedback directive attached to every outcome response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<NoticeDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationDto>,
}

impl From<&Feedback> for FeedbackDto {
    fn from(feedback: &Feedback) -> Self {
        Self {
            notice: feedback.notice.as_ref().map(NoticeDto::from),
            navigation: feedback.navigation.as_ref().map(NavigationDto::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecordDto {
    pub id: String,
    pub created: DateTime<Utc>,
    #[schema(example = "3362")]
    pub main_code: String,
    #[schema(example = "Acme Corp")]
    pub client_name: String,
    pub service_provided: String,
}

impl From<&Record<CompanyRecord>> for CompanyRecordDto {
    fn from(record: &Record<CompanyRecord>) -> Self {
        Self {
            id: record.id.clone(),
            created: record.created,
            main_code: record.fields.main_code.clone(),
            client_name: record.fields.client_name.clone(),
            service_provided: record.fields.service_provided.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgreementDto {
    pub id: String,
    pub created: DateTime<Utc>,
    pub client_name: String,
    pub main_code: String,
    pub service_provided: String,
    pub signed: bool,
}

impl From<&Record<Agreement>> for AgreementDto {
    fn from(record: &Record<Agreement>) -> Self {
        Self {
            id: record.id.clone(),
            created: record.created,
            client_name: record.fields.client_name.clone(),
            main_code: record.fields.main_code.clone(),
            service_provided: record.fields.service_provided.clone(),
            signed: record.fields.signed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub id: String,
    pub created: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: String,
}

impl From<&Record<Reservation>> for ReservationDto {
    fn from(record: &Record<Reservation>) -> Self {
        Self {
            id: record.id.clone(),
            created: record.created,
            name: record.fields.name.clone(),
            email: record.fields.email.clone(),
            phone: record.fields.phone.clone(),
            special_requests: record.fields.special_requests.clone(),
        }
    }
}

/// Agreement awaiting signature, as shown on the agreement view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingAgreementDto {
    pub client_name: String,
    pub service_provided: String,
    pub guest_code: String,
    /// Verification time, shown as the agreement date.
    pub created: DateTime<Utc>,
}

impl From<&PendingAgreement> for PendingAgreementDto {
    fn from(pending: &PendingAgreement) -> Self {
        Self {
            client_name: pending.client_name.clone(),
            service_provided: pending.service_provided.clone(),
            guest_code: pending.guest_code.clone(),
            created: pending.created,
        }
    }
}
