//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    carts::models::CheckoutLine,
    fields::{try_get_amount, try_get_quantity, try_parse_col},
    orders::{
        models::{Order, OrderItem, OrderItemUuid, OrderUuid, TrackingEntry, TrackingEntryUuid},
        status::{DeliveryMethod, OrderStatus},
    },
    products::models::ProductUuid,
    users::models::UserUuid,
};

const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_OWNED_SQL: &str = include_str!("sql/get_order_owned.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const SET_PAYMENT_PROOF_SQL: &str = include_str!("sql/set_payment_proof.sql");
const INSERT_ORDER_ITEM_SQL: &str = include_str!("sql/insert_order_item.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const INSERT_TRACKING_SQL: &str = include_str!("sql/insert_tracking.sql");
const LIST_TRACKING_SQL: &str = include_str!("sql/list_tracking.sql");

/// Computed figures persisted with a new order row.
#[derive(Debug, Clone)]
pub(crate) struct OrderInsert<'a> {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub order_number: &'a str,
    pub delivery_method: DeliveryMethod,
    pub delivery_address: Option<&'a str>,
    pub subtotal: u64,
    pub discount_amount: u64,
    pub points_used: i64,
    pub points_discount: u64,
    pub total: u64,
    pub payment_method: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderInsert<'_>,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(INSERT_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user.into_uuid())
            .bind(order.order_number)
            .bind(order.delivery_method.as_str())
            .bind(order.delivery_address)
            .bind(as_bigint(order.subtotal, "subtotal")?)
            .bind(as_bigint(order.discount_amount, "discount_amount")?)
            .bind(order.points_used)
            .bind(as_bigint(order.points_discount, "points_discount")?)
            .bind(as_bigint(order.total, "total")?)
            .bind(order.payment_method)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_owned(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_OWNED_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .bind(status.map(OrderStatus::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        status: Option<OrderStatus>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_ORDERS_SQL)
            .bind(user.into_uuid())
            .bind(status.map(OrderStatus::as_str))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn set_payment_proof(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        proof: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PAYMENT_PROOF_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(proof)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Snapshot one checkout line as an immutable order item.
    pub(crate) async fn insert_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: &CheckoutLine,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(&line.product_name)
            .bind(line.size_variant.as_deref())
            .bind(line.temperature_variant.as_deref())
            .bind(i64::from(line.quantity))
            .bind(as_bigint(line.unit_price, "unit_price")?)
            .bind(as_bigint(line.subtotal(), "subtotal")?)
            .bind(line.notes.as_deref())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn insert_tracking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
        notes: Option<&str>,
        created_by: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_TRACKING_SQL)
            .bind(TrackingEntryUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(notes)
            .bind(created_by.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_tracking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<TrackingEntry>, sqlx::Error> {
        query_as::<Postgres, TrackingEntry>(LIST_TRACKING_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

fn as_bigint(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            order_number: row.try_get("order_number")?,
            delivery_method: try_parse_col(row, "delivery_method")?,
            delivery_address: row.try_get("delivery_address")?,
            subtotal: try_get_amount(row, "subtotal")?,
            discount_amount: try_get_amount(row, "discount_amount")?,
            points_used: row.try_get("points_used")?,
            points_discount: try_get_amount(row, "points_discount")?,
            total: try_get_amount(row, "total")?,
            payment_method: row.try_get("payment_method")?,
            payment_status: try_parse_col(row, "payment_status")?,
            payment_proof: row.try_get("payment_proof")?,
            status: try_parse_col(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            size_variant: row.try_get("size_variant")?,
            temperature_variant: row.try_get("temperature_variant")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            subtotal: try_get_amount(row, "subtotal")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TrackingEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TrackingEntryUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            status: try_parse_col(row, "status")?,
            notes: row.try_get("notes")?,
            created_by: UserUuid::from_uuid(row.try_get("created_by")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
