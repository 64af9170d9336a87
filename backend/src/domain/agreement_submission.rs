//! Agreement signing for a verified guest.
//!
//! Runs the duplicate guard on `agreements.clientName`, then records a
//! signed agreement. A successful signing sets the view's latch, so a second
//! submission from the same view instance performs no store write. A
//! duplicate leaves the latch clear.

use async_trait::async_trait;
use tracing::info;

use crate::domain::duplicate_guard::{DuplicateGuard, GuardOutcome, SubmissionLatch};
use crate::domain::ports::AgreementCommand;
use crate::domain::{
    Agreement, Collection, Error, Feedback, PendingAgreement, Record, View, encode_fields,
};

/// Result of a signing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgreementOutcome {
    /// The signed agreement was stored.
    Signed(Record<Agreement>),
    /// The client already has an agreement on file.
    Duplicate,
    /// This view instance already submitted; nothing was sent.
    AlreadySubmitted,
}

impl AgreementOutcome {
    /// Wire label for the outcome.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Signed(_) => "signed",
            Self::Duplicate => "duplicate",
            Self::AlreadySubmitted => "already_submitted",
        }
    }

    /// Acknowledgement then home on success.
    #[must_use]
    pub fn feedback(&self) -> Feedback {
        match self {
            Self::Signed(_) => Feedback::acknowledged_then(View::Home),
            Self::Duplicate => Feedback::duplicate(),
            Self::AlreadySubmitted => Feedback::already_submitted(),
        }
    }
}

/// Build the agreement written for a pending signing.
///
/// `main_code` carries the guest code that verification matched.
#[must_use]
pub fn agreement_from_pending(pending: &PendingAgreement) -> Agreement {
    Agreement {
        client_name: pending.client_name.clone(),
        main_code: pending.guest_code.clone(),
        service_provided: pending.service_provided.clone(),
        signed: true,
    }
}

/// Signs pending agreements at most once per client.
#[derive(Clone)]
pub struct AgreementSubmissionService {
    guard: DuplicateGuard,
}

impl AgreementSubmissionService {
    /// Create a service writing through `guard`.
    pub fn new(guard: DuplicateGuard) -> Self {
        Self { guard }
    }
}

#[async_trait]
impl AgreementCommand for AgreementSubmissionService {
    async fn sign(
        &self,
        pending: &PendingAgreement,
        latch: &mut SubmissionLatch,
    ) -> Result<AgreementOutcome, Error> {
        if latch.is_set() {
            return Ok(AgreementOutcome::AlreadySubmitted);
        }

        let agreement = agreement_from_pending(pending);
        let fields = encode_fields(&agreement)
            .map_err(|err| Error::internal(format!("failed to encode agreement: {err}")))?;

        match self
            .guard
            .create_unique(Collection::Agreements, &agreement.client_name, fields)
            .await?
        {
            GuardOutcome::Duplicate => Ok(AgreementOutcome::Duplicate),
            GuardOutcome::Created(row) => {
                latch.set();
                info!(record_id = %row.id, "agreement signed");
                let record = row
                    .decode::<Agreement>()
                    .map_err(|err| Error::internal(format!("stored agreement unreadable: {err}")))?;
                Ok(AgreementOutcome::Signed(record))
            }
        }
    }
}
