//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`RecordStore`, `ReservationLedger`, `AdminCredentials`)
//! are implemented by outbound adapters. Driving ports are the use cases
//! inbound handlers call.

mod macros;
pub(crate) use macros::define_port_error;

mod agreement_command;
mod company_intake_command;
mod guest_verification;
mod listing_query;
mod record_store;
mod reservation_intake_command;
mod reservation_ledger;
mod staff_login;

pub use agreement_command::AgreementCommand;
#[cfg(test)]
pub use agreement_command::MockAgreementCommand;
pub use company_intake_command::CompanyIntakeCommand;
#[cfg(test)]
pub use company_intake_command::MockCompanyIntakeCommand;
pub use guest_verification::GuestVerification;
#[cfg(test)]
pub use guest_verification::MockGuestVerification;
pub use listing_query::ListingQuery;
#[cfg(test)]
pub use listing_query::MockListingQuery;
#[cfg(test)]
pub use record_store::MockRecordStore;
pub use record_store::{
    FieldFilter, FieldFilterError, ListQuery, RecordStore, RecordStoreError, SortOrder,
};
#[cfg(test)]
pub use reservation_intake_command::MockReservationIntakeCommand;
pub use reservation_intake_command::ReservationIntakeCommand;
#[cfg(test)]
pub use reservation_ledger::{MockAdminCredentials, MockReservationLedger};
pub use reservation_ledger::{AdminCredentials, LedgerError, ReservationLedger};
#[cfg(test)]
pub use staff_login::MockStaffLoginService;
pub use staff_login::StaffLoginService;
