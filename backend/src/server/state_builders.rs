//! Builders wiring the record store adapter into the HTTP state ports.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use intake::domain::ports::{RecordStore, StaffLoginService};
use intake::domain::{
    AgreementSubmissionService, CompanyIntakeService, DuplicateGuard, GuestVerificationService,
    ListingService, ReservationIntakeService,
};
use intake::inbound::http::state::HttpState;
use intake::outbound::record_store::{InMemoryRecordStore, PocketBaseRecordStore};

use super::config::RecordStoreChoice;

/// Driving ports plus the store they share, kept for readiness checks.
pub(super) struct StoreWiring {
    pub(super) http_state: HttpState,
    pub(super) records: Arc<dyn RecordStore>,
}

/// Build every driving port over one shared store.
fn services_over<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> StoreWiring
where
    S: RecordStore + StaffLoginService + 'static,
{
    let records: Arc<dyn RecordStore> = store.clone();
    let http_state = HttpState {
        staff_login: store,
        guests: Arc::new(GuestVerificationService::new(records.clone(), clock)),
        agreements: Arc::new(AgreementSubmissionService::new(DuplicateGuard::new(
            records.clone(),
        ))),
        company_intake: Arc::new(CompanyIntakeService::new(records.clone())),
        reservations: Arc::new(ReservationIntakeService::new(records.clone())),
        listing: Arc::new(ListingService::new(records.clone())),
    };
    StoreWiring {
        http_state,
        records,
    }
}

/// Build the HTTP state for the configured record store.
///
/// # Errors
/// Returns [`std::io::Error`] when the PocketBase client cannot be built.
pub(super) fn build_http_state(choice: &RecordStoreChoice) -> std::io::Result<StoreWiring> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match choice {
        RecordStoreChoice::InMemory { staff_account } => {
            warn!("no record store URL configured; using the in-memory store");
            let mut store = InMemoryRecordStore::new(clock.clone());
            if let Some((username, password)) = staff_account {
                info!(%username, "registering development staff account");
                store = store.with_staff_account(username, password);
            }
            Ok(services_over(Arc::new(store), clock))
        }
        RecordStoreChoice::PocketBase(config) => {
            info!(base_url = %config.base_url, "using hosted record store");
            let store = PocketBaseRecordStore::new(config.clone()).map_err(|err| {
                std::io::Error::other(format!("record store client setup failed: {err}"))
            })?;
            Ok(services_over(Arc::new(store), clock))
        }
    }
}
