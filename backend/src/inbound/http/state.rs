//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AgreementCommand, CompanyIntakeCommand, GuestVerification, ListingQuery,
    ReservationIntakeCommand, StaffLoginService,
};

/// Dependency bundle for the intake handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use intake::domain::{
///     AgreementSubmissionService, CompanyIntakeService, DuplicateGuard,
///     GuestVerificationService, ListingService, ReservationIntakeService,
/// };
/// use intake::inbound::http::state::HttpState;
/// use intake::outbound::record_store::InMemoryRecordStore;
/// use mockable::DefaultClock;
///
/// let store = Arc::new(InMemoryRecordStore::new(Arc::new(DefaultClock)));
/// let state = HttpState {
///     staff_login: store.clone(),
///     guests: Arc::new(GuestVerificationService::new(store.clone(), Arc::new(DefaultClock))),
///     agreements: Arc::new(AgreementSubmissionService::new(DuplicateGuard::new(store.clone()))),
///     company_intake: Arc::new(CompanyIntakeService::new(store.clone())),
///     reservations: Arc::new(ReservationIntakeService::new(store.clone())),
///     listing: Arc::new(ListingService::new(store)),
/// };
/// let _listing = state.listing.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub staff_login: Arc<dyn StaffLoginService>,
    pub guests: Arc<dyn GuestVerification>,
    pub agreements: Arc<dyn AgreementCommand>,
    pub company_intake: Arc<dyn CompanyIntakeCommand>,
    pub reservations: Arc<dyn ReservationIntakeCommand>,
    pub listing: Arc<dyn ListingQuery>,
}
