//! HTTP inbound adapter exposing REST endpoints.
//!
//! Intake handlers mount under `/api/v1` behind the cookie session; the
//! standalone reservation API routes live in [`reservation_api`].

pub mod agreements;
pub mod company_records;
pub mod dto;
pub mod error;
pub mod guest;
pub mod health;
pub mod listing;
pub mod reservation_api;
pub mod reservations;
pub mod session;
pub mod session_config;
pub mod staff;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
