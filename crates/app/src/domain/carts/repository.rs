//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    carts::models::{CartItem, CartItemUuid, CheckoutLine, NewCartItem},
    fields::{try_get_amount, try_get_quantity},
    products::models::ProductUuid,
    users::models::UserUuid,
};

const GET_CART_ITEMS_SQL: &str = include_str!("sql/get_cart_items.sql");
const GET_CART_ITEM_SQL: &str = include_str!("sql/get_cart_item.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("sql/upsert_cart_item.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");
const ITEMS_FOR_CHECKOUT_SQL: &str = include_str!("sql/items_for_checkout.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(GET_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        user: UserUuid,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(GET_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a cart line, merging into an existing line for the same
    /// (user, product, size, temperature). Returns the line's UUID.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: &NewCartItem,
        unit_price: u64,
    ) -> Result<CartItemUuid, sqlx::Error> {
        let unit_price = i64::try_from(unit_price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "unit_price".to_string(),
            source: Box::new(e),
        })?;

        let uuid = query_scalar::<Postgres, Uuid>(UPSERT_CART_ITEM_SQL)
            .bind(Uuid::now_v7())
            .bind(user.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.size_variant.as_deref())
            .bind(item.temperature_variant.as_deref())
            .bind(i64::from(item.quantity))
            .bind(unit_price)
            .bind(item.notes.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        Ok(CartItemUuid::from_uuid(uuid))
    }

    pub(crate) async fn update_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        user: UserUuid,
        quantity: Option<u32>,
        notes: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .bind(quantity.map(i64::from))
            .bind(notes)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn items_for_checkout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CheckoutLine>, sqlx::Error> {
        query_as::<Postgres, CheckoutLine>(ITEMS_FOR_CHECKOUT_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            image: row.try_get("image")?,
            is_available: row.try_get("is_available")?,
            size_variant: row.try_get("size_variant")?,
            temperature_variant: row.try_get("temperature_variant")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CheckoutLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            size_variant: row.try_get("size_variant")?,
            temperature_variant: row.try_get("temperature_variant")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            notes: row.try_get("notes")?,
            is_available: row.try_get("is_available")?,
            stock_quantity: row.try_get("stock_quantity")?,
        })
    }
}
