//! Review Models

use jiff::Timestamp;

use crate::{
    domain::{orders::models::OrderUuid, products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<Review>;

/// Review Model
#[derive(Debug, Clone)]
pub struct Review {
    pub uuid: ReviewUuid,
    pub user_uuid: UserUuid,
    pub user_name: String,
    pub product_uuid: ProductUuid,
    pub order_uuid: Option<OrderUuid>,
    pub rating: i16,
    pub comment: Option<String>,
    pub images: Vec<String>,
    pub is_visible: bool,
    pub admin_reply: Option<String>,
    pub replied_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// New Review Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub product_uuid: ProductUuid,
    pub order_uuid: Option<OrderUuid>,
    pub rating: i16,
    pub comment: Option<String>,
    pub images: Vec<String>,
}
