//! Reviews service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::models::ProductUuid,
        reviews::{
            errors::ReviewsServiceError,
            models::{NewReview, Review, ReviewUuid},
            repository::PgReviewsRepository,
        },
        users::models::UserUuid,
    },
};

/// How many reviews a product listing returns.
const PRODUCT_REVIEWS_LIMIT: i64 = 50;

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn create_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<ReviewUuid, ReviewsServiceError> {
        if !(1..=5).contains(&review.rating) {
            return Err(ReviewsServiceError::InvalidRating);
        }

        let mut tx = self.db.begin().await?;

        if let Some(order) = review.order_uuid {
            let ordered = self
                .repository
                .has_ordered_product(&mut tx, order, review.product_uuid)
                .await?;

            if !ordered {
                return Err(ReviewsServiceError::NotOrdered);
            }
        }

        let exists = self
            .repository
            .review_exists(&mut tx, user, review.product_uuid, review.order_uuid)
            .await?;

        if exists {
            return Err(ReviewsServiceError::AlreadyReviewed);
        }

        let uuid = ReviewUuid::new();

        self.repository
            .insert_review(&mut tx, uuid, user, &review)
            .await?;

        self.repository
            .refresh_product_stats(&mut tx, review.product_uuid)
            .await?;

        tx.commit().await?;

        Ok(uuid)
    }

    async fn product_reviews(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<Review>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self
            .repository
            .latest_for_product(&mut tx, product, PRODUCT_REVIEWS_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn reply(&self, review: ReviewUuid, reply: String) -> Result<(), ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.reply_to_review(&mut tx, review, &reply).await?;

        if rows_affected == 0 {
            return Err(ReviewsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Create a review and refresh the product's rating figures.
    async fn create_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<ReviewUuid, ReviewsServiceError>;

    /// Visible reviews for a product, newest first.
    async fn product_reviews(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Attach a staff reply to a review.
    async fn reply(&self, review: ReviewUuid, reply: String) -> Result<(), ReviewsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::products::ProductsService as _, test::TestContext};

    use super::*;

    fn review(product: ProductUuid, rating: i16) -> NewReview {
        NewReview {
            product_uuid: product,
            order_uuid: None,
            rating,
            comment: Some("Great coffee".to_string()),
            images: Vec::new(),
        }
    }

    #[tokio::test]
    async fn review_updates_product_rating_figures() -> TestResult {
        let ctx = TestContext::new().await;
        let ayu = ctx.create_customer("Ayu").await;
        let budi = ctx.create_customer("Budi").await;
        let product = ctx.create_product("Latte", 25_000, None).await;

        ctx.reviews.create_review(ayu, review(product, 5)).await?;
        ctx.reviews.create_review(budi, review(product, 4)).await?;

        let details = ctx.products.get_product(product).await?;

        assert_eq!(details.product.total_reviews, 2);
        assert_eq!(
            details.product.average_rating,
            rust_decimal::Decimal::new(45, 1)
        );
        assert_eq!(details.reviews.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn rating_outside_range_is_rejected() {
        let ctx = TestContext::new().await;
        let user = ctx.create_customer("Ayu").await;
        let product = ctx.create_product("Latte", 25_000, None).await;

        for rating in [0, 6] {
            let result = ctx.reviews.create_review(user, review(product, rating)).await;

            assert!(
                matches!(result, Err(ReviewsServiceError::InvalidRating)),
                "expected InvalidRating for {rating}, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn duplicate_review_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_customer("Ayu").await;
        let product = ctx.create_product("Latte", 25_000, None).await;

        ctx.reviews.create_review(user, review(product, 5)).await?;

        let result = ctx.reviews.create_review(user, review(product, 3)).await;

        assert!(
            matches!(result, Err(ReviewsServiceError::AlreadyReviewed)),
            "expected AlreadyReviewed, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn order_scoped_review_requires_the_product_in_the_order() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_customer("Ayu").await;
        let product = ctx.create_product("Latte", 25_000, None).await;
        let other_product = ctx.create_product("Croissant", 18_000, None).await;
        let order = ctx.place_order(user, product, 1).await;

        let result = ctx
            .reviews
            .create_review(
                user,
                NewReview {
                    product_uuid: other_product,
                    order_uuid: Some(order),
                    rating: 4,
                    comment: None,
                    images: Vec::new(),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::NotOrdered)),
            "expected NotOrdered, got {result:?}"
        );

        let allowed = ctx
            .reviews
            .create_review(
                user,
                NewReview {
                    product_uuid: product,
                    order_uuid: Some(order),
                    rating: 4,
                    comment: None,
                    images: Vec::new(),
                },
            )
            .await;

        assert!(allowed.is_ok(), "expected success, got {allowed:?}");

        Ok(())
    }

    #[tokio::test]
    async fn reply_is_recorded_with_timestamp() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_customer("Ayu").await;
        let product = ctx.create_product("Latte", 25_000, None).await;

        let review_uuid = ctx.reviews.create_review(user, review(product, 5)).await?;

        ctx.reviews
            .reply(review_uuid, "Thank you!".to_string())
            .await?;

        let reviews = ctx.reviews.product_reviews(product).await?;
        let replied = reviews.first().expect("one review");

        assert_eq!(replied.admin_reply.as_deref(), Some("Thank you!"));
        assert!(replied.replied_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn reply_to_unknown_review_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .reviews
            .reply(ReviewUuid::new(), "Thanks".to_string())
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
