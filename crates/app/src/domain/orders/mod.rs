//! Orders

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;
pub use status::{DeliveryMethod, OrderStatus, PaymentStatus, TransitionPolicy};
