//! Redeem Codes
//!
//! Resolution is soft: a code that fails any validity check simply
//! contributes no discount. The hard failure paths live in the order
//! workflow, not here.

pub mod discount;
pub mod models;
pub(crate) mod repository;
