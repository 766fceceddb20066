//! Auth Models

use uuid::Uuid;

use crate::domain::users::models::{Role, UserUuid};

/// The account a validated bearer token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: UserUuid,
    pub role: Role,
}

/// Metadata of an issued API token; the raw token is shown only once.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub uuid: Uuid,
    pub token: String,
}
