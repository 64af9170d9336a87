//! Driving port for public reservations and the staff reservation pages.

use async_trait::async_trait;

use crate::domain::{Error, ReservationDraft, ReservationPage, ReservationReceipt};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationIntakeCommand: Send + Sync {
    async fn submit(&self, draft: &ReservationDraft) -> Result<ReservationReceipt, Error>;

    /// One page of the most recent reservations; `page` is clamped.
    async fn recent_page(&self, page: usize) -> Result<ReservationPage, Error>;
}
