//! Record store adapters.
//!
//! - [`PocketBaseRecordStore`]: reqwest client for a hosted PocketBase
//!   instance, also providing staff authentication.
//! - [`InMemoryRecordStore`]: process-local store used in development and
//!   tests, enforcing the same unique keys as the hosted indexes.

mod dto;
mod filter;
mod memory;
mod pocketbase;

pub use memory::InMemoryRecordStore;
pub use pocketbase::{PocketBaseConfig, PocketBaseRecordStore};
