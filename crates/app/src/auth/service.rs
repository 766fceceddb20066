//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{AuthenticatedUser, IssuedToken},
        repository::PgAuthRepository,
        token::{generate_token, hash_token},
    },
    domain::users::models::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user. The raw token is
    /// returned once and only its hash is stored.
    ///
    /// # Errors
    ///
    /// Returns an error when the database insert fails.
    pub async fn issue_token(&self, user: UserUuid) -> Result<IssuedToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let token = generate_token();

        self.repository
            .create_api_token(token_uuid, user, &hash_token(&token))
            .await?;

        Ok(IssuedToken {
            uuid: token_uuid,
            token,
        })
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error when the database update fails.
    pub async fn revoke_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        let rows_affected = self.repository.revoke_api_token(token_uuid).await?;

        Ok(rows_affected > 0)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let hash = hash_token(bearer_token);

        let user = self
            .repository
            .find_user_by_token_hash(&hash)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        // Best-effort metadata update; auth success must not depend on it.
        let _touch_result = self.repository.touch_last_used(&hash).await;

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the account it belongs to.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;
}
