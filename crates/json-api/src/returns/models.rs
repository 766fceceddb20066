//! Return response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dailybrew_app::domain::returns::models::{Return, ReturnDetails, ReturnItem};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReturnResponse {
    pub uuid: Uuid,
    pub order_uuid: Uuid,
    pub order_number: String,
    pub return_number: String,
    pub reason: String,
    pub description: String,
    pub images: Vec<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub refund_amount: Option<u64>,
    pub processed_at: Option<String>,
    pub created_at: String,
}

impl From<Return> for ReturnResponse {
    fn from(retrn: Return) -> Self {
        Self {
            uuid: retrn.uuid.into_uuid(),
            order_uuid: retrn.order_uuid.into_uuid(),
            order_number: retrn.order_number,
            return_number: retrn.return_number,
            reason: retrn.reason,
            description: retrn.description,
            images: retrn.images,
            status: retrn.status.to_string(),
            admin_notes: retrn.admin_notes,
            refund_amount: retrn.refund_amount,
            processed_at: retrn.processed_at.map(|at| at.to_string()),
            created_at: retrn.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReturnItemResponse {
    pub uuid: Uuid,
    pub order_item_uuid: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
}

impl From<ReturnItem> for ReturnItemResponse {
    fn from(item: ReturnItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            order_item_uuid: item.order_item_uuid.into_uuid(),
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReturnDetailsResponse {
    #[serde(flatten)]
    pub retrn: ReturnResponse,
    pub items: Vec<ReturnItemResponse>,
}

impl From<ReturnDetails> for ReturnDetailsResponse {
    fn from(details: ReturnDetails) -> Self {
        Self {
            retrn: details.retrn.into(),
            items: details.items.into_iter().map(Into::into).collect(),
        }
    }
}
