//! Guest verification: match a guest code and client name to a company
//! record and decide where the guest goes next.
//!
//! The code is matched exactly against `company_records.mainCode` (no
//! trimming, no case folding). Names are compared after
//! [`normalize_client_name`](crate::domain::normalize_client_name). Any store
//! failure is indistinguishable from "no such code".

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::client_name::client_names_match;
use crate::domain::ports::{FieldFilter, GuestVerification, RecordStore};
use crate::domain::{COMPANY_MAIN_CODE_FIELD, Collection, CompanyRecord, Feedback};

/// Validation errors for guest sign-in input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuestSignInError {
    #[error("guest code must not be empty")]
    EmptyGuestCode,
    #[error("client name must not be empty")]
    EmptyClientName,
}

/// Guest code and name as typed by the guest.
///
/// Both values are kept verbatim; only blankness is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestSignIn {
    guest_code: String,
    client_name: String,
}

impl GuestSignIn {
    /// Reject blank values; non-blank input is kept untrimmed.
    pub fn try_from_parts(guest_code: &str, client_name: &str) -> Result<Self, GuestSignInError> {
        if guest_code.trim().is_empty() {
            return Err(GuestSignInError::EmptyGuestCode);
        }
        if client_name.trim().is_empty() {
            return Err(GuestSignInError::EmptyClientName);
        }
        Ok(Self {
            guest_code: guest_code.to_owned(),
            client_name: client_name.to_owned(),
        })
    }

    /// Code the guest typed, matched exactly against `mainCode`.
    pub fn guest_code(&self) -> &str {
        &self.guest_code
    }

    /// Name the guest typed, compared after normalization.
    pub fn client_name(&self) -> &str {
        &self.client_name
    }
}

/// Agreement details carried from verification to signing.
///
/// `client_name` and `service_provided` come from the stored company record,
/// not from guest input. `created` is the verification time shown on the
/// agreement view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAgreement {
    pub client_name: String,
    pub service_provided: String,
    /// The guest code that matched.
    pub guest_code: String,
    pub created: DateTime<Utc>,
}

/// Result of verifying a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Code and name matched; the agreement is ready to sign.
    ProceedToAgreement(PendingAgreement),
    /// The code exists but the name does not match it.
    NameMismatch,
    /// No company record carries the code, or the lookup failed.
    CodeInvalid,
}

impl VerificationOutcome {
    /// Wire label for the outcome.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProceedToAgreement(_) => "proceed_to_agreement",
            Self::NameMismatch => "name_mismatch",
            Self::CodeInvalid => "code_invalid",
        }
    }

    /// Notice and navigation the guest page shows for this outcome.
    #[must_use]
    pub fn feedback(&self) -> Feedback {
        match self {
            Self::ProceedToAgreement(_) => Feedback::proceed_to_agreement(),
            Self::NameMismatch => Feedback::name_mismatch(),
            Self::CodeInvalid => Feedback::code_invalid(),
        }
    }
}

/// Store-backed guest verification.
#[derive(Clone)]
pub struct GuestVerificationService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl GuestVerificationService {
    /// Create a service reading company records from `store`.
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    async fn lookup(&self, guest_code: &str) -> Option<CompanyRecord> {
        let filter = FieldFilter::equals(COMPANY_MAIN_CODE_FIELD, guest_code).ok()?;
        let row = match self
            .store
            .first_matching(Collection::CompanyRecords, &filter)
            .await
        {
            Ok(Some(row)) => row,
            Ok(None) => {
                debug!("no company record for guest code");
                return None;
            }
            Err(error) => {
                warn!(%error, "guest code lookup failed");
                return None;
            }
        };
        match row.decode::<CompanyRecord>() {
            Ok(record) => Some(record.fields),
            Err(error) => {
                warn!(record_id = %row.id, %error, "company record could not be decoded");
                None
            }
        }
    }
}

#[async_trait]
impl GuestVerification for GuestVerificationService {
    async fn verify(&self, sign_in: &GuestSignIn) -> VerificationOutcome {
        let Some(record) = self.lookup(sign_in.guest_code()).await else {
            return VerificationOutcome::CodeInvalid;
        };

        if !client_names_match(&record.client_name, sign_in.client_name()) {
            debug!("guest name does not match company record");
            return VerificationOutcome::NameMismatch;
        }

        VerificationOutcome::ProceedToAgreement(PendingAgreement {
            client_name: record.client_name,
            service_provided: record.service_provided,
            guest_code: sign_in.guest_code().to_owned(),
            created: self.clock.utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StoredRecord;
    use crate::domain::ports::{MockRecordStore, RecordStoreError};
    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};
    use serde_json::json;

    struct FixtureClock(DateTime<Utc>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn company_row(main_code: &str, client_name: &str) -> StoredRecord {
        StoredRecord {
            id: "cr_1".to_owned(),
            created: Utc::now(),
            fields: json!({
                "mainCode": main_code,
                "clientName": client_name,
                "serviceProvided": "Incorporation"
            })
            .as_object()
            .cloned()
            .expect("object"),
        }
    }

    fn service(store: MockRecordStore, now: DateTime<Utc>) -> GuestVerificationService {
        GuestVerificationService::new(Arc::new(store), Arc::new(FixtureClock(now)))
    }

    fn sign_in(code: &str, name: &str) -> GuestSignIn {
        GuestSignIn::try_from_parts(code, name).expect("valid sign-in")
    }

    #[rstest]
    #[tokio::test]
    async fn matching_name_proceeds_with_stored_values(now: DateTime<Utc>) {
        let mut store = MockRecordStore::new();
        store
            .expect_first_matching()
            .withf(|collection, filter| {
                *collection == Collection::CompanyRecords
                    && filter.field() == "mainCode"
                    && filter.value() == "3362"
            })
            .returning(|_, _| Ok(Some(company_row("3362", "Acme Corp"))));

        let outcome = service(store, now)
            .verify(&sign_in("3362", "  ACME, Corp "))
            .await;

        assert_eq!(
            outcome,
            VerificationOutcome::ProceedToAgreement(PendingAgreement {
                client_name: "Acme Corp".to_owned(),
                service_provided: "Incorporation".to_owned(),
                guest_code: "3362".to_owned(),
                created: now,
            })
        );
    }

    #[rstest]
    #[tokio::test]
    async fn different_name_is_a_mismatch(now: DateTime<Utc>) {
        let mut store = MockRecordStore::new();
        store
            .expect_first_matching()
            .returning(|_, _| Ok(Some(company_row("3362", "Smith-John"))));

        let outcome = service(store, now).verify(&sign_in("3362", "SmithJohn")).await;
        assert_eq!(outcome, VerificationOutcome::NameMismatch);
        assert!(outcome.feedback().navigation.is_none());
    }

    #[rstest]
    #[case::not_found(Ok(None))]
    #[case::unreachable(Err(RecordStoreError::connection("refused")))]
    #[case::undecodable(Ok(Some(StoredRecord {
        id: "bad".to_owned(),
        created: Utc::now(),
        fields: serde_json::Map::new(),
    })))]
    #[tokio::test]
    async fn lookup_failures_are_code_invalid(
        now: DateTime<Utc>,
        #[case] response: Result<Option<StoredRecord>, RecordStoreError>,
    ) {
        let mut store = MockRecordStore::new();
        store
            .expect_first_matching()
            .return_once(move |_, _| response);

        let outcome = service(store, now).verify(&sign_in("0000", "Anyone")).await;
        assert_eq!(outcome, VerificationOutcome::CodeInvalid);
        assert_eq!(outcome.label(), "code_invalid");
    }

    #[rstest]
    #[tokio::test]
    async fn code_is_not_trimmed_before_lookup(now: DateTime<Utc>) {
        let mut store = MockRecordStore::new();
        store
            .expect_first_matching()
            .withf(|_, filter| filter.value() == " 3362 ")
            .returning(|_, _| Ok(None));

        let outcome = service(store, now).verify(&sign_in(" 3362 ", "Acme")).await;
        assert_eq!(outcome, VerificationOutcome::CodeInvalid);
    }

    #[rstest]
    #[case("", "Acme", GuestSignInError::EmptyGuestCode)]
    #[case("3362", "  ", GuestSignInError::EmptyClientName)]
    fn blank_inputs_are_rejected(
        #[case] code: &str,
        #[case] name: &str,
        #[case] expected: GuestSignInError,
    ) {
        assert_eq!(GuestSignIn::try_from_parts(code, name), Err(expected));
    }
}
