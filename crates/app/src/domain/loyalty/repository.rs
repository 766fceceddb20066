//! Loyalty Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    fields::try_parse_col,
    loyalty::models::{
        LoyaltySettings, LoyaltyTransaction, LoyaltyTransactionUuid, TransactionKind,
    },
    orders::models::OrderUuid,
    users::models::UserUuid,
};

const ACTIVE_SETTINGS_SQL: &str = include_str!("sql/active_settings.sql");
const DEBIT_POINTS_SQL: &str = include_str!("sql/debit_points.sql");
const CREDIT_POINTS_SQL: &str = include_str!("sql/credit_points.sql");
const INSERT_TRANSACTION_SQL: &str = include_str!("sql/insert_transaction.sql");
const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");
const COUNT_TRANSACTIONS_SQL: &str = include_str!("sql/count_transactions.sql");

/// A ledger entry to append alongside a balance mutation.
#[derive(Debug, Clone)]
pub(crate) struct LedgerEntry<'a> {
    pub user: UserUuid,
    pub order: Option<OrderUuid>,
    pub kind: TransactionKind,
    pub points: i64,
    pub description: &'a str,
    pub balance_before: i64,
    pub balance_after: i64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgLoyaltyRepository;

impl PgLoyaltyRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn active_settings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<LoyaltySettings>, sqlx::Error> {
        query_as::<Postgres, LoyaltySettings>(ACTIVE_SETTINGS_SQL)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Conditionally debit the balance. Returns the balance after the
    /// debit, or `None` when the balance was too small (the caller
    /// treats that as an insufficient-points failure).
    pub(crate) async fn debit_points(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        points: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        query_scalar::<Postgres, i64>(DEBIT_POINTS_SQL)
            .bind(user.into_uuid())
            .bind(points)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Credit the balance, returning the balance after the credit.
    pub(crate) async fn credit_points(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        points: i64,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(CREDIT_POINTS_SQL)
            .bind(user.into_uuid())
            .bind(points)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn insert_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: &LedgerEntry<'_>,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_TRANSACTION_SQL)
            .bind(LoyaltyTransactionUuid::new().into_uuid())
            .bind(entry.user.into_uuid())
            .bind(entry.order.map(OrderUuid::into_uuid))
            .bind(entry.kind.as_str())
            .bind(entry.points)
            .bind(entry.description)
            .bind(entry.balance_before)
            .bind(entry.balance_after)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LoyaltyTransaction>, sqlx::Error> {
        query_as::<Postgres, LoyaltyTransaction>(LIST_TRANSACTIONS_SQL)
            .bind(user.into_uuid())
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_transactions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_TRANSACTIONS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for LoyaltySettings {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            points_per_rupiah: row.try_get("points_per_rupiah")?,
            rupiah_per_point: row.try_get("rupiah_per_point")?,
            min_points_redeem: row.try_get("min_points_redeem")?,
            max_points_per_order: row.try_get("max_points_per_order")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for LoyaltyTransaction {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: LoyaltyTransactionUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            order_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("order_uuid")?
                .map(OrderUuid::from_uuid),
            kind: try_parse_col(row, "kind")?,
            points: row.try_get("points")?,
            description: row.try_get("description")?,
            balance_before: row.try_get("balance_before")?,
            balance_after: row.try_get("balance_after")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
