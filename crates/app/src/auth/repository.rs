//! Auth repository.

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    auth::models::AuthenticatedUser,
    domain::{fields::try_parse_col, users::models::UserUuid},
};

const FIND_USER_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_user_by_token_hash.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");
const TOUCH_LAST_USED_SQL: &str = include_str!("sql/touch_last_used.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_user_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<AuthenticatedUser>, sqlx::Error> {
        query_as::<Postgres, AuthenticatedUser>(FIND_USER_BY_TOKEN_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_api_token(
        &self,
        token_uuid: Uuid,
        user: UserUuid,
        token_hash: &str,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_API_TOKEN_SQL)
            .bind(token_uuid)
            .bind(user.into_uuid())
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns the number of tokens revoked (zero when already revoked
    /// or unknown).
    pub(crate) async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_API_TOKEN_SQL)
            .bind(token_uuid)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn touch_last_used(&self, hash: &str) -> Result<(), sqlx::Error> {
        query(TOUCH_LAST_USED_SQL)
            .bind(hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for AuthenticatedUser {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            role: try_parse_col(row, "role")?,
        })
    }
}
