//! Cart response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dailybrew_app::domain::carts::models::{CartItem, CartView};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub image: Option<String>,
    pub is_available: bool,
    pub size_variant: Option<String>,
    pub temperature_variant: Option<String>,
    pub quantity: u32,
    pub unit_price: u64,
    pub notes: Option<String>,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            image: item.image,
            is_available: item.is_available,
            size_variant: item.size_variant,
            temperature_variant: item.temperature_variant,
            quantity: item.quantity,
            unit_price: item.unit_price,
            notes: item.notes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub subtotal: u64,
    pub total_items: usize,
}

impl From<CartView> for CartResponse {
    fn from(cart: CartView) -> Self {
        Self {
            items: cart.items.into_iter().map(Into::into).collect(),
            subtotal: cart.subtotal,
            total_items: cart.total_items,
        }
    }
}
