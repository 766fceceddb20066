//! Order Models

use jiff::Timestamp;

use crate::{
    domain::{
        orders::status::{DeliveryMethod, OrderStatus, PaymentStatus},
        products::models::ProductUuid,
        users::models::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Tracking Entry UUID
pub type TrackingEntryUuid = TypedUuid<TrackingEntry>;

/// Order Model
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub order_number: String,
    pub delivery_method: DeliveryMethod,
    pub delivery_address: Option<String>,
    pub subtotal: u64,
    pub discount_amount: u64,
    pub points_used: i64,
    pub points_discount: u64,
    pub total: u64,
    pub payment_method: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_proof: Option<String>,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Immutable snapshot of a cart line taken at order creation, decoupled
/// from live product data.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub size_variant: Option<String>,
    pub temperature_variant: Option<String>,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// Append-only audit row for one status change.
#[derive(Debug, Clone)]
pub struct TrackingEntry {
    pub uuid: TrackingEntryUuid,
    pub order_uuid: OrderUuid,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_by: UserUuid,
    pub created_at: Timestamp,
}

/// An order with its item snapshots and tracking history.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub tracking: Vec<TrackingEntry>,
}

/// Checkout request taken against the user's current cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub delivery_method: DeliveryMethod,
    pub delivery_address: Option<String>,
    pub payment_method: Option<String>,
    pub redeem_code: Option<String>,
    pub points_used: i64,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedOrder {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub total: u64,
}
