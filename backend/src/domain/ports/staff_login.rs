//! Driving port for staff authentication.
//!
//! Staff access is a capability granted by the record store. Handlers only
//! see this trait, so tests substitute a double instead of a live store.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, StaffId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffLoginService: Send + Sync {
    /// Validate credentials and return the authenticated staff id.
    ///
    /// Returns [`crate::domain::ErrorCode::Unauthorized`] when the store
    /// rejects the credentials.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<StaffId, Error>;
}
