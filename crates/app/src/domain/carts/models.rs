//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// Cart Item Model
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub image: Option<String>,
    pub is_available: bool,
    pub size_variant: Option<String>,
    pub temperature_variant: Option<String>,
    pub quantity: u32,
    /// Price snapshot taken when the line was added or last merged.
    pub unit_price: u64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The whole cart for one user.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub subtotal: u64,
    pub total_items: usize,
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub size_variant: Option<String>,
    pub temperature_variant: Option<String>,
    pub quantity: u32,
    pub notes: Option<String>,
}

/// Partial update of a cart line; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartItemUpdate {
    pub quantity: Option<u32>,
    pub notes: Option<String>,
}

/// A cart line joined with the product state the checkout needs.
#[derive(Debug, Clone)]
pub struct CheckoutLine {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub size_variant: Option<String>,
    pub temperature_variant: Option<String>,
    pub quantity: u32,
    pub unit_price: u64,
    pub notes: Option<String>,
    pub is_available: bool,
    pub stock_quantity: Option<i64>,
}

impl CheckoutLine {
    /// Line total at the snapshotted unit price.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}
