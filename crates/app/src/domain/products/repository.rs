//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
};

use crate::domain::{
    fields::{try_get_amount, try_parse_col},
    products::{
        models::{Product, ProductFilter, ProductUuid, ProductVariant, ProductVariantUuid},
        pricing,
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_VARIANTS_SQL: &str = include_str!("sql/list_variants.sql");
const VARIANT_ADJUSTMENT_SQL: &str = include_str!("sql/variant_adjustment.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .bind(filter.search.as_deref())
            .bind(filter.featured)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .bind(filter.search.as_deref())
            .bind(filter.featured)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductVariant>, sqlx::Error> {
        query_as::<Postgres, ProductVariant>(LIST_VARIANTS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Resolve the unit price for a product with the given variant
    /// selections. Unmatched selections contribute no adjustment.
    pub(crate) async fn resolve_unit_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &Product,
        size_variant: Option<&str>,
        temperature_variant: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let size_adjustment = match size_variant {
            Some(value) => self.variant_adjustment(tx, product.uuid, "size", value).await?,
            None => None,
        };

        let temperature_adjustment = match temperature_variant {
            Some(value) => {
                self.variant_adjustment(tx, product.uuid, "temperature", value)
                    .await?
            }
            None => None,
        };

        Ok(pricing::quote(
            product.base_price,
            size_adjustment,
            temperature_adjustment,
        ))
    }

    async fn variant_adjustment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        kind: &str,
        value: &str,
    ) -> Result<Option<i64>, sqlx::Error> {
        query_scalar::<Postgres, i64>(VARIANT_ADJUSTMENT_SQL)
            .bind(product.into_uuid())
            .bind(kind)
            .bind(value)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Decrement stock for a stock-tracked product. Returns the number of
    /// rows updated; zero means the product had less stock than requested.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            base_price: try_get_amount(row, "base_price")?,
            image: row.try_get("image")?,
            is_featured: row.try_get("is_featured")?,
            is_available: row.try_get("is_available")?,
            stock_quantity: row.try_get("stock_quantity")?,
            average_rating: row.try_get("average_rating")?,
            total_reviews: row.try_get("total_reviews")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductVariant {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductVariantUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            kind: try_parse_col(row, "variant_kind")?,
            value: row.try_get("variant_value")?,
            price_adjustment: row.try_get("price_adjustment")?,
            is_available: row.try_get("is_available")?,
        })
    }
}
