//! API token generation and hashing.
//!
//! Only the SHA-256 hash of a token is stored; the raw token is printed
//! once at issuance and never again.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Token prefix, useful for spotting leaked credentials in logs.
pub const TOKEN_PREFIX: &str = "db";

#[must_use]
pub fn generate_token() -> String {
    format!(
        "{TOKEN_PREFIX}_{}{}",
        Uuid::now_v7().simple(),
        Uuid::now_v7().simple()
    )
}

#[must_use]
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
