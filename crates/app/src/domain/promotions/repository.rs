//! Redeem Codes Repository

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    fields::{try_get_amount, try_parse_col},
    orders::models::OrderUuid,
    promotions::models::{RedeemCode, RedeemCodeUuid},
    users::models::UserUuid,
};

const FIND_VALID_CODE_SQL: &str = include_str!("sql/find_valid_code.sql");
const CONSUME_CODE_SQL: &str = include_str!("sql/consume_code.sql");
const LOG_USAGE_SQL: &str = include_str!("sql/log_usage.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Find a code that is active, inside its validity window on the
    /// given date, and still under its usage limit.
    pub(crate) async fn find_valid_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        on: Date,
    ) -> Result<Option<RedeemCode>, sqlx::Error> {
        query_as::<Postgres, RedeemCode>(FIND_VALID_CODE_SQL)
            .bind(code)
            .bind(SqlxDate::from(on))
            .fetch_optional(&mut **tx)
            .await
    }

    /// Atomically take one usage slot. Zero rows affected means the code
    /// reached its limit since it was read.
    pub(crate) async fn consume_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: RedeemCodeUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CONSUME_CODE_SQL)
            .bind(code.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn log_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: RedeemCodeUuid,
        user: UserUuid,
        order: OrderUuid,
        discount_amount: u64,
    ) -> Result<(), sqlx::Error> {
        let discount = i64::try_from(discount_amount).unwrap_or(i64::MAX);

        query(LOG_USAGE_SQL)
            .bind(Uuid::now_v7())
            .bind(code.into_uuid())
            .bind(user.into_uuid())
            .bind(order.into_uuid())
            .bind(discount)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for RedeemCode {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let max_discount = row
            .try_get::<Option<i64>, _>("max_discount")?
            .map(|cap| {
                u64::try_from(cap).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "max_discount".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: RedeemCodeUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            discount_type: try_parse_col(row, "discount_type")?,
            discount_value: row.try_get("discount_value")?,
            min_purchase: try_get_amount(row, "min_purchase")?,
            max_discount,
            start_date: row.try_get::<SqlxDate, _>("start_date")?.to_jiff(),
            end_date: row.try_get::<SqlxDate, _>("end_date")?.to_jiff(),
            usage_limit: row.try_get("usage_limit")?,
            used_count: row.try_get("used_count")?,
            is_active: row.try_get("is_active")?,
        })
    }
}
