//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **record_store**: hosted PocketBase client and an in-memory store
//! - **persistence**: Diesel over PostgreSQL for the reservation API
//!
//! Adapters translate between domain types and wire or row formats. They
//! contain no business logic.

pub mod persistence;
pub mod record_store;
