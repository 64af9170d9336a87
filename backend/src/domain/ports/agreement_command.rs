//! Driving port for signing a pending agreement.

use async_trait::async_trait;

use crate::domain::{AgreementOutcome, Error, PendingAgreement, SubmissionLatch};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgreementCommand: Send + Sync {
    /// Sign `pending` unless `latch` shows this view already submitted.
    async fn sign(
        &self,
        pending: &PendingAgreement,
        latch: &mut SubmissionLatch,
    ) -> Result<AgreementOutcome, Error>;
}
