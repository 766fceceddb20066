//! Reviews Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    orders::models::OrderUuid,
    products::models::ProductUuid,
    reviews::models::{NewReview, Review, ReviewUuid},
    users::models::UserUuid,
};

const INSERT_REVIEW_SQL: &str = include_str!("sql/insert_review.sql");
const REVIEW_EXISTS_SQL: &str = include_str!("sql/review_exists.sql");
const HAS_ORDERED_PRODUCT_SQL: &str = include_str!("sql/has_ordered_product.sql");
const REFRESH_PRODUCT_STATS_SQL: &str = include_str!("sql/refresh_product_stats.sql");
const LATEST_FOR_PRODUCT_SQL: &str = include_str!("sql/latest_for_product.sql");
const REPLY_TO_REVIEW_SQL: &str = include_str!("sql/reply_to_review.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
        user: UserUuid,
        new: &NewReview,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_REVIEW_SQL)
            .bind(review.into_uuid())
            .bind(user.into_uuid())
            .bind(new.product_uuid.into_uuid())
            .bind(new.order_uuid.map(OrderUuid::into_uuid))
            .bind(new.rating)
            .bind(new.comment.as_deref())
            .bind(&new.images)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn review_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
        order: Option<OrderUuid>,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(REVIEW_EXISTS_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .bind(order.map(OrderUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn has_ordered_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(HAS_ORDERED_PRODUCT_SQL)
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Recompute the product's denormalized rating figures.
    pub(crate) async fn refresh_product_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<(), sqlx::Error> {
        query(REFRESH_PRODUCT_STATS_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn latest_for_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        limit: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query_as::<Postgres, Review>(LATEST_FOR_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn reply_to_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
        reply: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REPLY_TO_REVIEW_SQL)
            .bind(review.into_uuid())
            .bind(reply)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Review {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            user_name: row.try_get("user_name")?,
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            order_uuid: row
                .try_get::<Option<Uuid>, _>("order_uuid")?
                .map(OrderUuid::from_uuid),
            rating: row.try_get("rating")?,
            comment: row.try_get("comment")?,
            images: row.try_get("images")?,
            is_visible: row.try_get("is_visible")?,
            admin_reply: row.try_get("admin_reply")?,
            replied_at: row
                .try_get::<Option<SqlxTimestamp>, _>("replied_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
