//! Orders service: checkout, status transitions, payment proof.

use async_trait::async_trait;
use jiff::Zoned;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{models::CheckoutLine, repository::PgCartsRepository},
        loyalty::{
            computation,
            models::TransactionKind,
            repository::{LedgerEntry, PgLoyaltyRepository},
        },
        notifications::repository::PgNotificationsRepository,
        numbers,
        orders::{
            errors::{OrdersServiceError, is_unique_violation},
            models::{CreatedOrder, NewOrder, Order, OrderDetails, OrderUuid},
            repository::{OrderInsert, PgOrdersRepository},
            status::{DeliveryMethod, OrderStatus, PaymentStatus, TransitionPolicy},
        },
        products::repository::PgProductsRepository,
        promotions::{discount, repository::PgPromotionsRepository},
        users::{models::UserUuid, repository::PgUsersRepository},
    },
    outbox::{
        models::{ORDER_COMPLETED, OrderCompletedEmail},
        repository::PgOutboxRepository,
    },
    pagination::{Page, PagedResult},
};

/// Attempts before giving up on an order-number collision.
const NUMBER_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    policy: TransitionPolicy,
    repository: PgOrdersRepository,
    carts: PgCartsRepository,
    products: PgProductsRepository,
    promotions: PgPromotionsRepository,
    loyalty: PgLoyaltyRepository,
    users: PgUsersRepository,
    notifications: PgNotificationsRepository,
    outbox: PgOutboxRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, policy: TransitionPolicy) -> Self {
        Self {
            db,
            policy,
            repository: PgOrdersRepository::new(),
            carts: PgCartsRepository::new(),
            products: PgProductsRepository::new(),
            promotions: PgPromotionsRepository::new(),
            loyalty: PgLoyaltyRepository::new(),
            users: PgUsersRepository::new(),
            notifications: PgNotificationsRepository::new(),
            outbox: PgOutboxRepository::new(),
        }
    }

    /// One checkout attempt inside a single transaction. Any failure
    /// rolls back every effect.
    async fn try_create_order(
        &self,
        user: UserUuid,
        order: &NewOrder,
    ) -> Result<CreatedOrder, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        if order.delivery_method == DeliveryMethod::Delivery
            && order
                .delivery_address
                .as_deref()
                .is_none_or(|address| address.trim().is_empty())
        {
            return Err(OrdersServiceError::DeliveryAddressRequired);
        }

        let lines = self.carts.items_for_checkout(&mut tx, user).await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        for line in &lines {
            if !line.is_available {
                return Err(OrdersServiceError::ProductUnavailable(
                    line.product_name.clone(),
                ));
            }

            if line
                .stock_quantity
                .is_some_and(|stock| stock < i64::from(line.quantity))
            {
                return Err(OrdersServiceError::InsufficientStock(
                    line.product_name.clone(),
                ));
            }
        }

        let subtotal = lines
            .iter()
            .map(CheckoutLine::subtotal)
            .fold(0_u64, u64::saturating_add);

        // Redeem code resolution is soft: any failed check just means no
        // discount.
        let today = Zoned::now().date();
        let mut discount_amount = 0_u64;
        let mut applied_code = None;

        if let Some(code_input) = order.redeem_code.as_deref() {
            if let Some(code) = self
                .promotions
                .find_valid_code(&mut tx, code_input, today)
                .await?
            {
                if let Some(amount) = discount::compute(&code, subtotal) {
                    if self.promotions.consume_code(&mut tx, code.uuid).await? > 0 {
                        discount_amount = amount;
                        applied_code = Some(code.uuid);
                    }
                }
            }
        }

        // Loyalty redemption: over-balance requests fail hard, everything
        // else degrades to a zero discount.
        let redemption = if order.points_used > 0 {
            let balance = self.users.loyalty_points(&mut tx, user).await?;
            let settings = self.loyalty.active_settings(&mut tx).await?;

            computation::redemption(order.points_used, balance, settings.as_ref())?
        } else {
            computation::redemption(0, 0, None)?
        };

        let total = subtotal
            .saturating_sub(discount_amount)
            .saturating_sub(redemption.discount);

        let order_number = numbers::generate(numbers::ORDER_PREFIX);

        let created = self
            .repository
            .insert_order(
                &mut tx,
                &OrderInsert {
                    uuid: OrderUuid::new(),
                    user,
                    order_number: &order_number,
                    delivery_method: order.delivery_method,
                    delivery_address: order.delivery_address.as_deref(),
                    subtotal,
                    discount_amount,
                    points_used: order.points_used,
                    points_discount: redemption.discount,
                    total,
                    payment_method: order.payment_method.as_deref(),
                },
            )
            .await?;

        for line in &lines {
            self.repository
                .insert_order_item(&mut tx, created.uuid, line)
                .await?;

            if line.stock_quantity.is_some() {
                let rows_affected = self
                    .products
                    .decrement_stock(&mut tx, line.product_uuid, line.quantity)
                    .await?;

                if rows_affected == 0 {
                    return Err(OrdersServiceError::InsufficientStock(
                        line.product_name.clone(),
                    ));
                }
            }
        }

        self.repository
            .insert_tracking(
                &mut tx,
                created.uuid,
                OrderStatus::Pending,
                Some("Order created"),
                user,
            )
            .await?;

        if let Some(code) = applied_code {
            self.promotions
                .log_usage(&mut tx, code, user, created.uuid, discount_amount)
                .await?;
        }

        // The full requested amount is charged even when the discount
        // reflects a smaller capped amount.
        if redemption.discount > 0 {
            let balance_after = self
                .loyalty
                .debit_points(&mut tx, user, redemption.points_charged)
                .await?
                .ok_or(OrdersServiceError::InsufficientPoints)?;

            self.loyalty
                .insert_transaction(
                    &mut tx,
                    &LedgerEntry {
                        user,
                        order: Some(created.uuid),
                        kind: TransactionKind::Redeem,
                        points: -redemption.points_charged,
                        description: "Redeem points for order",
                        balance_before: balance_after + redemption.points_charged,
                        balance_after,
                    },
                )
                .await?;
        }

        self.carts.clear_cart(&mut tx, user).await?;

        self.notifications
            .insert(
                &mut tx,
                user,
                "order_status",
                "Order Created",
                &format!(
                    "Your order {order_number} has been created successfully"
                ),
                Some(&format!("/orders/{}", created.uuid)),
            )
            .await?;

        tx.commit().await?;

        Ok(CreatedOrder {
            uuid: created.uuid,
            order_number: created.order_number,
            total: created.total,
        })
    }

    async fn accrue_on_completion(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        order: &Order,
    ) -> Result<(), OrdersServiceError> {
        let Some(settings) = self.loyalty.active_settings(tx).await? else {
            return Ok(());
        };

        let earned = computation::points_earned(order.total, &settings);

        if earned <= 0 {
            return Ok(());
        }

        let balance_after = self
            .loyalty
            .credit_points(tx, order.user_uuid, earned)
            .await?;

        self.loyalty
            .insert_transaction(
                tx,
                &LedgerEntry {
                    user: order.user_uuid,
                    order: Some(order.uuid),
                    kind: TransactionKind::Earn,
                    points: earned,
                    description: &format!("Earned from order {}", order.order_number),
                    balance_before: balance_after - earned,
                    balance_after,
                },
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<CreatedOrder, OrdersServiceError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.try_create_order(user, &order).await {
                Err(error)
                    if is_unique_violation(&error, "orders_order_number_key")
                        && attempt < NUMBER_ATTEMPTS =>
                {
                    continue;
                }
                result => return result,
            }
        }
    }

    async fn get_order(
        &self,
        order: OrderUuid,
        owner: Option<UserUuid>,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = match owner {
            Some(user) => self.repository.get_order_owned(&mut tx, order, user).await?,
            None => self.repository.get_order(&mut tx, order).await?,
        }
        .ok_or(OrdersServiceError::NotFound)?;

        let items = self.repository.list_order_items(&mut tx, order).await?;
        let tracking = self.repository.list_tracking(&mut tx, order).await?;

        tx.commit().await?;

        Ok(OrderDetails {
            order: found,
            items,
            tracking,
        })
    }

    async fn list_orders(
        &self,
        user: UserUuid,
        status: Option<OrderStatus>,
        page: Page,
    ) -> Result<PagedResult<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.count_orders(&mut tx, user, status).await?;

        let orders = self
            .repository
            .list_orders(&mut tx, user, status, page.limit(), page.offset())
            .await?;

        tx.commit().await?;

        Ok(PagedResult {
            items: orders,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
        actor: UserUuid,
        notes: Option<String>,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_order(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if !self.policy.allows(current.status, status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        self.repository.update_status(&mut tx, order, status).await?;

        self.repository
            .insert_tracking(&mut tx, order, status, notes.as_deref(), actor)
            .await?;

        self.notifications
            .insert(
                &mut tx,
                current.user_uuid,
                "order_status",
                "Order Update",
                &format!(
                    "Your order {} status has been updated to {status}",
                    current.order_number
                ),
                Some(&format!("/orders/{order}")),
            )
            .await?;

        if status == OrderStatus::Completed {
            self.accrue_on_completion(&mut tx, &current).await?;

            if let Some(customer) = self.users.get_user(&mut tx, current.user_uuid).await? {
                let payload = serde_json::to_string(&OrderCompletedEmail {
                    to: customer.email,
                    name: customer.name,
                    order_number: current.order_number.clone(),
                    total: current.total,
                })
                .unwrap_or_default();

                self.outbox
                    .enqueue(&mut tx, ORDER_COMPLETED, &payload)
                    .await?;
            }
        }

        tx.commit().await?;

        Ok(())
    }

    async fn attach_payment_proof(
        &self,
        order: OrderUuid,
        user: UserUuid,
        proof: String,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_order_owned(&mut tx, order, user)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if current.payment_status == PaymentStatus::Paid {
            return Err(OrdersServiceError::PaymentAlreadyConfirmed);
        }

        self.repository
            .set_payment_proof(&mut tx, order, user, &proof)
            .await?;

        self.notifications
            .insert(
                &mut tx,
                user,
                "payment",
                "Payment Proof Uploaded",
                "Your payment proof has been uploaded and is being verified",
                Some(&format!("/orders/{order}")),
            )
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Create an order from the user's cart in one atomic transaction.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<CreatedOrder, OrdersServiceError>;

    /// Retrieve an order with items and tracking, optionally owner-scoped.
    async fn get_order(
        &self,
        order: OrderUuid,
        owner: Option<UserUuid>,
    ) -> Result<OrderDetails, OrdersServiceError>;

    /// List the user's orders, newest first, optionally filtered by status.
    async fn list_orders(
        &self,
        user: UserUuid,
        status: Option<OrderStatus>,
        page: Page,
    ) -> Result<PagedResult<Order>, OrdersServiceError>;

    /// Apply a status transition with its side effects.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
        actor: UserUuid,
        notes: Option<String>,
    ) -> Result<(), OrdersServiceError>;

    /// Attach a payment proof reference to an owned order.
    async fn attach_payment_proof(
        &self,
        order: OrderUuid,
        user: UserUuid,
        proof: String,
    ) -> Result<(), OrdersServiceError>;
}
