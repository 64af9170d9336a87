//! Staff intake of company records.
//!
//! Opening the form reports the most recently used main code so staff can
//! pick the next one. Submission is guarded on `company_records.mainCode` and
//! latched per form instance.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::duplicate_guard::{DuplicateGuard, GuardOutcome, SubmissionLatch};
use crate::domain::ports::{CompanyIntakeCommand, ListQuery, RecordStore};
use crate::domain::{
    COMPANY_MAIN_CODE_FIELD, Collection, CompanyRecord, Error, Feedback, Record, View,
    encode_fields,
};

/// Validation errors for a company record draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompanyDraftError {
    #[error("main code is required")]
    MissingMainCode,
    #[error("client name is required")]
    MissingClientName,
    #[error("service provided is required")]
    MissingServiceProvided,
}

impl CompanyDraftError {
    /// Name of the offending form field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingMainCode => "mainCode",
            Self::MissingClientName => "clientName",
            Self::MissingServiceProvided => "serviceProvided",
        }
    }
}

/// Validated company record input.
///
/// Values are stored as entered; guest lookups match `main_code` exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecordDraft(CompanyRecord);

impl CompanyRecordDraft {
    /// Require all three fields to be non-blank.
    pub fn try_from_parts(
        main_code: &str,
        client_name: &str,
        service_provided: &str,
    ) -> Result<Self, CompanyDraftError> {
        if main_code.trim().is_empty() {
            return Err(CompanyDraftError::MissingMainCode);
        }
        if client_name.trim().is_empty() {
            return Err(CompanyDraftError::MissingClientName);
        }
        if service_provided.trim().is_empty() {
            return Err(CompanyDraftError::MissingServiceProvided);
        }
        Ok(Self(CompanyRecord {
            main_code: main_code.to_owned(),
            client_name: client_name.to_owned(),
            service_provided: service_provided.to_owned(),
        }))
    }

    /// The validated record fields.
    pub fn record(&self) -> &CompanyRecord {
        &self.0
    }
}

/// State returned when the intake form is opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyIntakeForm {
    /// Main code of the newest stored record, shown as a hint.
    pub previous_main_code: Option<String>,
}

/// Result of a company record submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyIntakeOutcome {
    /// The record was stored.
    Saved(Record<CompanyRecord>),
    /// Another record already uses the main code.
    Duplicate,
    /// This form instance already submitted; nothing was sent.
    AlreadySubmitted,
}

impl CompanyIntakeOutcome {
    /// Wire label for the outcome.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saved(_) => "saved",
            Self::Duplicate => "duplicate",
            Self::AlreadySubmitted => "already_submitted",
        }
    }

    /// Notice and navigation shown after the submission.
    #[must_use]
    pub fn feedback(&self) -> Feedback {
        match self {
            Self::Saved(_) => Feedback::acknowledged_then(View::GuestSignIn),
            Self::Duplicate => Feedback::duplicate(),
            Self::AlreadySubmitted => Feedback::already_submitted(),
        }
    }
}

/// Staff-side intake of company records, guarded on `mainCode`.
#[derive(Clone)]
pub struct CompanyIntakeService {
    store: Arc<dyn RecordStore>,
    guard: DuplicateGuard,
}

impl CompanyIntakeService {
    /// Create a service over `store`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let guard = DuplicateGuard::new(store.clone());
        Self { store, guard }
    }
}

#[async_trait]
impl CompanyIntakeCommand for CompanyIntakeService {
    async fn open_form(&self) -> CompanyIntakeForm {
        let rows = match self
            .store
            .list(Collection::CompanyRecords, &ListQuery::newest(1, 1))
            .await
        {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, "previous main code lookup failed");
                return CompanyIntakeForm::default();
            }
        };
        CompanyIntakeForm {
            previous_main_code: rows
                .first()
                .and_then(|row| row.field_str(COMPANY_MAIN_CODE_FIELD))
                .map(str::to_owned),
        }
    }

    async fn submit(
        &self,
        draft: &CompanyRecordDraft,
        latch: &mut SubmissionLatch,
    ) -> Result<CompanyIntakeOutcome, Error> {
        if latch.is_set() {
            return Ok(CompanyIntakeOutcome::AlreadySubmitted);
        }

        let record = draft.record();
        let fields = encode_fields(record)
            .map_err(|err| Error::internal(format!("failed to encode company record: {err}")))?;

        match self
            .guard
            .create_unique(Collection::CompanyRecords, &record.main_code, fields)
            .await?
        {
            GuardOutcome::Duplicate => Ok(CompanyIntakeOutcome::Duplicate),
            GuardOutcome::Created(row) => {
                latch.set();
                info!(record_id = %row.id, "company record saved");
                let saved = row.decode::<CompanyRecord>().map_err(|err| {
                    Error::internal(format!("stored company record unreadable: {err}"))
                })?;
                Ok(CompanyIntakeOutcome::Saved(saved))
            }
        }
    }
}
