//! Driving port for the staff company record form.

use async_trait::async_trait;

use crate::domain::{
    CompanyIntakeForm, CompanyIntakeOutcome, CompanyRecordDraft, Error, SubmissionLatch,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyIntakeCommand: Send + Sync {
    /// Form state for a fresh view; store failures yield an empty form.
    async fn open_form(&self) -> CompanyIntakeForm;

    /// Guarded create keyed on `mainCode`.
    async fn submit(
        &self,
        draft: &CompanyRecordDraft,
        latch: &mut SubmissionLatch,
    ) -> Result<CompanyIntakeOutcome, Error>;
}
