//! Driving port for the staff listing view.

use async_trait::async_trait;

use crate::domain::{Error, ListingView};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingQuery: Send + Sync {
    async fn listing(&self) -> Result<ListingView, Error>;
}
