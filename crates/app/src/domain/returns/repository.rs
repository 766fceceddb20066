//! Returns Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    fields::{try_get_amount, try_get_quantity, try_parse_col},
    orders::models::{OrderItemUuid, OrderUuid},
    returns::models::{Return, ReturnDecision, ReturnItem, ReturnItemUuid, ReturnStatus, ReturnUuid},
    users::models::UserUuid,
};

const INSERT_RETURN_SQL: &str = include_str!("sql/insert_return.sql");
const GET_RETURN_SQL: &str = include_str!("sql/get_return.sql");
const GET_RETURN_OWNED_SQL: &str = include_str!("sql/get_return_owned.sql");
const RETURN_EXISTS_FOR_ORDER_SQL: &str = include_str!("sql/return_exists_for_order.sql");
const LIST_USER_RETURNS_SQL: &str = include_str!("sql/list_user_returns.sql");
const COUNT_USER_RETURNS_SQL: &str = include_str!("sql/count_user_returns.sql");
const LIST_RETURNS_SQL: &str = include_str!("sql/list_returns.sql");
const COUNT_RETURNS_SQL: &str = include_str!("sql/count_returns.sql");
const PROCESS_RETURN_SQL: &str = include_str!("sql/process_return.sql");
const SNAPSHOT_ALL_ITEMS_SQL: &str = include_str!("sql/snapshot_all_items.sql");
const SNAPSHOT_ITEM_SQL: &str = include_str!("sql/snapshot_item.sql");
const LIST_RETURN_ITEMS_SQL: &str = include_str!("sql/list_return_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReturnsRepository;

impl PgReturnsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_return(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        retrn: ReturnUuid,
        order: OrderUuid,
        user: UserUuid,
        return_number: &str,
        reason: &str,
        description: &str,
        images: &[String],
    ) -> Result<(), sqlx::Error> {
        query(INSERT_RETURN_SQL)
            .bind(retrn.into_uuid())
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(return_number)
            .bind(reason)
            .bind(description)
            .bind(images)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_return(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        retrn: ReturnUuid,
    ) -> Result<Option<Return>, sqlx::Error> {
        query_as::<Postgres, Return>(GET_RETURN_SQL)
            .bind(retrn.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_return_owned(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        retrn: ReturnUuid,
        user: UserUuid,
    ) -> Result<Option<Return>, sqlx::Error> {
        query_as::<Postgres, Return>(GET_RETURN_OWNED_SQL)
            .bind(retrn.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn return_exists_for_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(RETURN_EXISTS_FOR_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_returns(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Return>, sqlx::Error> {
        query_as::<Postgres, Return>(LIST_USER_RETURNS_SQL)
            .bind(user.into_uuid())
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_user_returns(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_USER_RETURNS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_returns(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<ReturnStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Return>, sqlx::Error> {
        query_as::<Postgres, Return>(LIST_RETURNS_SQL)
            .bind(status.map(ReturnStatus::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_returns(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<ReturnStatus>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_RETURNS_SQL)
            .bind(status.map(ReturnStatus::as_str))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn process_return(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        retrn: ReturnUuid,
        decision: &ReturnDecision,
        processed_by: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let refund = decision
            .refund_amount
            .map(|amount| {
                i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "refund_amount".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()?;

        let rows_affected = query(PROCESS_RETURN_SQL)
            .bind(retrn.into_uuid())
            .bind(decision.status.as_str())
            .bind(decision.admin_notes.as_deref())
            .bind(refund)
            .bind(processed_by.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Snapshot every item of the order into the return.
    pub(crate) async fn snapshot_all_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        retrn: ReturnUuid,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SNAPSHOT_ALL_ITEMS_SQL)
            .bind(retrn.into_uuid())
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Snapshot one order item, guarded to the order being returned.
    pub(crate) async fn snapshot_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        retrn: ReturnUuid,
        item: OrderItemUuid,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SNAPSHOT_ITEM_SQL)
            .bind(retrn.into_uuid())
            .bind(item.into_uuid())
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_return_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        retrn: ReturnUuid,
    ) -> Result<Vec<ReturnItem>, sqlx::Error> {
        query_as::<Postgres, ReturnItem>(LIST_RETURN_ITEMS_SQL)
            .bind(retrn.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Return {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let refund_amount = row
            .try_get::<Option<i64>, _>("refund_amount")?
            .map(|amount| {
                u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "refund_amount".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: ReturnUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            order_number: row.try_get("order_number")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            return_number: row.try_get("return_number")?,
            reason: row.try_get("reason")?,
            description: row.try_get("description")?,
            images: row.try_get("images")?,
            status: try_parse_col(row, "status")?,
            admin_notes: row.try_get("admin_notes")?,
            refund_amount,
            processed_by: row
                .try_get::<Option<Uuid>, _>("processed_by")?
                .map(UserUuid::from_uuid),
            processed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("processed_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ReturnItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReturnItemUuid::from_uuid(row.try_get("uuid")?),
            return_uuid: ReturnUuid::from_uuid(row.try_get("return_uuid")?),
            order_item_uuid: OrderItemUuid::from_uuid(row.try_get("order_item_uuid")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            subtotal: try_get_amount(row, "subtotal")?,
        })
    }
}
