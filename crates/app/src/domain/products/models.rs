//! Product Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{fields::UnknownValue, reviews::models::Review},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Variant UUID
pub type ProductVariantUuid = TypedUuid<ProductVariant>;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub base_price: u64,
    pub image: Option<String>,
    pub is_featured: bool,
    pub is_available: bool,
    /// `None` means the product is not stock-tracked.
    pub stock_quantity: Option<i64>,
    pub average_rating: Decimal,
    pub total_reviews: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Variant axis a product can be customized on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Size,
    Temperature,
}

impl VariantKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Temperature => "temperature",
        }
    }
}

impl FromStr for VariantKind {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "size" => Ok(Self::Size),
            "temperature" => Ok(Self::Temperature),
            other => Err(UnknownValue::new("variant_kind", other)),
        }
    }
}

impl Display for VariantKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Product Variant Model
#[derive(Debug, Clone)]
pub struct ProductVariant {
    pub uuid: ProductVariantUuid,
    pub product_uuid: ProductUuid,
    pub kind: VariantKind,
    pub value: String,
    pub price_adjustment: i64,
    pub is_available: bool,
}

/// A product together with its variants and latest visible reviews.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub product: Product,
    pub variants: Vec<ProductVariant>,
    pub reviews: Vec<Review>,
}

/// Catalog listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub featured: bool,
}
