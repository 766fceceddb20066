//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{Product, ProductDetails, ProductFilter, ProductUuid},
        repository::PgProductsRepository,
    },
    domain::reviews::repository::PgReviewsRepository,
    pagination::{Page, PagedResult},
};

/// How many of the latest reviews are returned with a product.
const PRODUCT_REVIEWS_LIMIT: i64 = 10;

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    reviews: PgReviewsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            reviews: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: Page,
    ) -> Result<PagedResult<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.count_products(&mut tx, &filter).await?;

        let products = self
            .repository
            .list_products(&mut tx, &filter, page.limit(), page.offset())
            .await?;

        tx.commit().await?;

        Ok(PagedResult {
            items: products,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductDetails, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .get_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        let variants = self.repository.list_variants(&mut tx, product).await?;

        let reviews = self
            .reviews
            .latest_for_product(&mut tx, product, PRODUCT_REVIEWS_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(ProductDetails {
            product: found,
            variants,
            reviews,
        })
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List available products, filtered and paginated.
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: Page,
    ) -> Result<PagedResult<Product>, ProductsServiceError>;

    /// Retrieve a single product with variants and latest reviews.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductDetails, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn get_product_returns_catalog_entry_with_variants() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx.create_product("Latte", 25_000, None).await;
        ctx.create_variant(product, "size", "large", 5_000).await;
        ctx.create_variant(product, "temperature", "iced", 2_000).await;

        let details = ctx.products.get_product(product).await?;

        assert_eq!(details.product.uuid, product);
        assert_eq!(details.product.base_price, 25_000);
        assert_eq!(details.variants.len(), 2);
        assert!(details.reviews.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_filters_by_search_term() -> TestResult {
        let ctx = TestContext::new().await;

        let latte = ctx.create_product("Caffe Latte", 25_000, None).await;
        ctx.create_product("Croissant", 18_000, None).await;

        let listed = ctx
            .products
            .list_products(
                ProductFilter {
                    search: Some("latte".to_string()),
                    featured: false,
                },
                Page::default(),
            )
            .await?;

        assert_eq!(listed.total, 1);
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items.first().map(|p| p.uuid), Some(latte));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_reports_totals_across_pages() -> TestResult {
        let ctx = TestContext::new().await;

        for index in 0..3 {
            ctx.create_product(&format!("Brew {index}"), 10_000, None).await;
        }

        let listed = ctx
            .products
            .list_products(ProductFilter::default(), Page::new(1, 2))
            .await?;

        assert_eq!(listed.total, 3);
        assert_eq!(listed.items.len(), 2);

        Ok(())
    }
}
