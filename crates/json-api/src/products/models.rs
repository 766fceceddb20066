//! Product response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dailybrew_app::domain::products::models::{
    Product, ProductDetails, ProductVariant, VariantKind,
};

use crate::reviews::models::ReviewResponse;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub base_price: u64,
    pub image: Option<String>,
    pub is_featured: bool,
    pub is_available: bool,
    pub stock_quantity: Option<i64>,
    pub average_rating: String,
    pub total_reviews: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            slug: product.slug,
            description: product.description,
            base_price: product.base_price,
            image: product.image,
            is_featured: product.is_featured,
            is_available: product.is_available,
            stock_quantity: product.stock_quantity,
            average_rating: product.average_rating.to_string(),
            total_reviews: product.total_reviews,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct VariantResponse {
    pub uuid: Uuid,
    pub value: String,
    pub price_adjustment: i64,
    pub is_available: bool,
}

impl From<ProductVariant> for VariantResponse {
    fn from(variant: ProductVariant) -> Self {
        Self {
            uuid: variant.uuid.into_uuid(),
            value: variant.value,
            price_adjustment: variant.price_adjustment,
            is_available: variant.is_available,
        }
    }
}

/// Variants grouped by axis, as the storefront consumes them.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct VariantGroups {
    pub size: Vec<VariantResponse>,
    pub temperature: Vec<VariantResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProductDetailsResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub variants: VariantGroups,
    pub reviews: Vec<ReviewResponse>,
}

impl From<ProductDetails> for ProductDetailsResponse {
    fn from(details: ProductDetails) -> Self {
        let mut variants = VariantGroups::default();

        for variant in details.variants {
            match variant.kind {
                VariantKind::Size => variants.size.push(variant.into()),
                VariantKind::Temperature => variants.temperature.push(variant.into()),
            }
        }

        Self {
            product: details.product.into(),
            variants,
            reviews: details.reviews.into_iter().map(Into::into).collect(),
        }
    }
}
