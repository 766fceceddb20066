//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    fields::try_parse_col,
    users::models::{NewUser, User, UserUuid},
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_LOYALTY_POINTS_SQL: &str = include_str!("sql/get_loyalty_points.sql");

#[derive(Debug, Clone, Default)]
pub struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<Postgres, User>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.phone.as_deref())
            .bind(user.role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn loyalty_points(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(GET_LOYALTY_POINTS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            role: try_parse_col(row, "role")?,
            loyalty_points: row.try_get("loyalty_points")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
