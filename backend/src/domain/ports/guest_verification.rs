//! Driving port for guest sign-in.

use async_trait::async_trait;

use crate::domain::{GuestSignIn, VerificationOutcome};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestVerification: Send + Sync {
    /// Match the guest code and name against company records.
    ///
    /// Never fails: store errors are reported as
    /// [`VerificationOutcome::CodeInvalid`].
    async fn verify(&self, sign_in: &GuestSignIn) -> VerificationOutcome;
}
