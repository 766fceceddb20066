//! Order response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dailybrew_app::domain::orders::models::{Order, OrderDetails, OrderItem, TrackingEntry};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub delivery_method: String,
    pub delivery_address: Option<String>,
    pub subtotal: u64,
    pub discount_amount: u64,
    pub points_used: i64,
    pub points_discount: u64,
    pub total: u64,
    pub payment_method: Option<String>,
    pub payment_status: String,
    pub payment_proof: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            order_number: order.order_number,
            delivery_method: order.delivery_method.to_string(),
            delivery_address: order.delivery_address,
            subtotal: order.subtotal,
            discount_amount: order.discount_amount,
            points_used: order.points_used,
            points_discount: order.points_discount,
            total: order.total,
            payment_method: order.payment_method,
            payment_status: order.payment_status.to_string(),
            payment_proof: order.payment_proof,
            status: order.status.to_string(),
            created_at: order.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub size_variant: Option<String>,
    pub temperature_variant: Option<String>,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
    pub notes: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            size_variant: item.size_variant,
            temperature_variant: item.temperature_variant,
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal,
            notes: item.notes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TrackingEntryResponse {
    pub status: String,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: String,
}

impl From<TrackingEntry> for TrackingEntryResponse {
    fn from(entry: TrackingEntry) -> Self {
        Self {
            status: entry.status.to_string(),
            notes: entry.notes,
            created_by: entry.created_by.into_uuid(),
            created_at: entry.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct OrderDetailsResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
    pub tracking: Vec<TrackingEntryResponse>,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            order: details.order.into(),
            items: details.items.into_iter().map(Into::into).collect(),
            tracking: details.tracking.into_iter().map(Into::into).collect(),
        }
    }
}
