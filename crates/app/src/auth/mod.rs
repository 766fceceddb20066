//! Bearer-token authentication.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;
pub mod token;

pub use errors::AuthServiceError;
pub use models::AuthenticatedUser;
pub use service::*;
pub use token::{generate_token, hash_token};
