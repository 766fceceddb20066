//! Loyalty Ledger

pub mod computation;
pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::LoyaltyServiceError;
pub use service::*;
