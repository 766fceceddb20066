//! Test context for service-level integration tests.

use rust_decimal::Decimal;
use sqlx::{PgPool, query, query_scalar};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{CartsService as _, PgCartsService},
        loyalty::PgLoyaltyService,
        notifications::PgNotificationsService,
        orders::{
            OrdersService as _, PgOrdersService, TransitionPolicy,
            models::{NewOrder, OrderUuid},
            status::DeliveryMethod,
        },
        products::{PgProductsService, models::ProductUuid},
        promotions::models::RedeemCodeUuid,
        returns::PgReturnsService,
        reviews::PgReviewsService,
        users::models::UserUuid,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
    pub loyalty: PgLoyaltyService,
    pub returns: PgReturnsService,
    pub reviews: PgReviewsService,
    pub notifications: PgNotificationsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            db: test_db,
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone(), TransitionPolicy::Permissive),
            loyalty: PgLoyaltyService::new(db.clone()),
            returns: PgReturnsService::new(db.clone()),
            reviews: PgReviewsService::new(db.clone()),
            notifications: PgNotificationsService::new(db),
        }
    }

    pub fn pool(&self) -> &PgPool {
        self.db.pool()
    }

    pub fn app_db(&self) -> Db {
        Db::new(self.db.pool().clone())
    }

    pub async fn create_customer(&self, name: &str) -> UserUuid {
        self.create_user(name, "customer", 0).await
    }

    pub async fn create_customer_with_points(&self, name: &str, points: i64) -> UserUuid {
        self.create_user(name, "customer", points).await
    }

    pub async fn create_staff(&self, name: &str) -> UserUuid {
        self.create_user(name, "staff", 0).await
    }

    async fn create_user(&self, name: &str, role: &str, points: i64) -> UserUuid {
        let uuid = Uuid::now_v7();
        let email = format!("{}-{}@example.com", name.to_lowercase(), uuid.simple());

        query("INSERT INTO users (uuid, name, email, role, loyalty_points) VALUES ($1, $2, $3, $4, $5)")
            .bind(uuid)
            .bind(name)
            .bind(email)
            .bind(role)
            .bind(points)
            .execute(self.pool())
            .await
            .expect("Failed to create test user");

        UserUuid::from_uuid(uuid)
    }

    pub async fn create_product(
        &self,
        name: &str,
        base_price: i64,
        stock_quantity: Option<i64>,
    ) -> ProductUuid {
        let uuid = Uuid::now_v7();
        let slug = format!(
            "{}-{}",
            name.to_lowercase().replace(' ', "-"),
            uuid.simple()
        );

        query(
            "INSERT INTO products (uuid, name, slug, base_price, stock_quantity) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(uuid)
        .bind(name)
        .bind(slug)
        .bind(base_price)
        .bind(stock_quantity)
        .execute(self.pool())
        .await
        .expect("Failed to create test product");

        ProductUuid::from_uuid(uuid)
    }

    pub async fn create_variant(
        &self,
        product: ProductUuid,
        kind: &str,
        value: &str,
        price_adjustment: i64,
    ) {
        query(
            "INSERT INTO product_variants (uuid, product_uuid, variant_kind, variant_value, price_adjustment) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::now_v7())
        .bind(product.into_uuid())
        .bind(kind)
        .bind(value)
        .bind(price_adjustment)
        .execute(self.pool())
        .await
        .expect("Failed to create test variant");
    }

    pub async fn set_product_availability(&self, product: ProductUuid, available: bool) {
        query("UPDATE products SET is_available = $2 WHERE uuid = $1")
            .bind(product.into_uuid())
            .bind(available)
            .execute(self.pool())
            .await
            .expect("Failed to update availability");
    }

    pub async fn product_stock(&self, product: ProductUuid) -> Option<i64> {
        query_scalar("SELECT stock_quantity FROM products WHERE uuid = $1")
            .bind(product.into_uuid())
            .fetch_one(self.pool())
            .await
            .expect("Failed to read stock")
    }

    pub async fn create_percentage_code(
        &self,
        code: &str,
        percent: i64,
        min_purchase: i64,
        max_discount: Option<i64>,
        usage_limit: Option<i64>,
    ) -> RedeemCodeUuid {
        let uuid = Uuid::now_v7();

        query(
            "INSERT INTO redeem_codes (uuid, code, discount_type, discount_value, min_purchase, \
             max_discount, start_date, end_date, usage_limit) \
             VALUES ($1, $2, 'percentage', $3, $4, $5, \
                     CURRENT_DATE - 1, CURRENT_DATE + 1, $6)",
        )
        .bind(uuid)
        .bind(code)
        .bind(Decimal::from(percent))
        .bind(min_purchase)
        .bind(max_discount)
        .bind(usage_limit)
        .execute(self.pool())
        .await
        .expect("Failed to create redeem code");

        RedeemCodeUuid::from_uuid(uuid)
    }

    pub async fn code_used_count(&self, code: RedeemCodeUuid) -> i64 {
        query_scalar("SELECT used_count FROM redeem_codes WHERE uuid = $1")
            .bind(code.into_uuid())
            .fetch_one(self.pool())
            .await
            .expect("Failed to read used_count")
    }

    pub async fn set_loyalty_settings(
        &self,
        points_per_rupiah: Decimal,
        rupiah_per_point: Decimal,
        min_points_redeem: i64,
        max_points_per_order: Option<i64>,
    ) {
        query("UPDATE loyalty_settings SET is_active = FALSE")
            .execute(self.pool())
            .await
            .expect("Failed to deactivate settings");

        query(
            "INSERT INTO loyalty_settings (uuid, points_per_rupiah, rupiah_per_point, \
             min_points_redeem, max_points_per_order) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::now_v7())
        .bind(points_per_rupiah)
        .bind(rupiah_per_point)
        .bind(min_points_redeem)
        .bind(max_points_per_order)
        .execute(self.pool())
        .await
        .expect("Failed to create loyalty settings");
    }

    pub async fn loyalty_balance(&self, user: UserUuid) -> i64 {
        query_scalar("SELECT loyalty_points FROM users WHERE uuid = $1")
            .bind(user.into_uuid())
            .fetch_one(self.pool())
            .await
            .expect("Failed to read loyalty balance")
    }

    pub async fn set_payment_status(&self, order: OrderUuid, status: &str) {
        query("UPDATE orders SET payment_status = $2 WHERE uuid = $1")
            .bind(order.into_uuid())
            .bind(status)
            .execute(self.pool())
            .await
            .expect("Failed to update payment status");
    }

    pub async fn pending_outbox_events(&self, kind: &str) -> i64 {
        query_scalar(
            "SELECT COUNT(*) FROM outbox_events WHERE kind = $1 AND dispatched_at IS NULL",
        )
        .bind(kind)
        .fetch_one(self.pool())
        .await
        .expect("Failed to count outbox events")
    }

    /// Place a takeaway order for a single product via the real checkout.
    pub async fn place_order(&self, user: UserUuid, product: ProductUuid, quantity: u32) -> OrderUuid {
        self.carts
            .add_item(
                user,
                crate::domain::carts::models::NewCartItem {
                    product_uuid: product,
                    size_variant: None,
                    temperature_variant: None,
                    quantity,
                    notes: None,
                },
            )
            .await
            .expect("Failed to fill cart");

        self.orders
            .create_order(
                user,
                NewOrder {
                    delivery_method: DeliveryMethod::Takeaway,
                    delivery_address: None,
                    payment_method: None,
                    redeem_code: None,
                    points_used: 0,
                },
            )
            .await
            .expect("Failed to place order")
            .uuid
    }
}
