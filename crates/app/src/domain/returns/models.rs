//! Return Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;

use crate::{
    domain::{
        fields::UnknownValue,
        orders::models::{OrderItemUuid, OrderUuid},
        users::models::UserUuid,
    },
    uuids::TypedUuid,
};

/// Return UUID
pub type ReturnUuid = TypedUuid<Return>;

/// Return Item UUID
pub type ReturnItemUuid = TypedUuid<ReturnItem>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl ReturnStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for ReturnStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownValue::new("status", other)),
        }
    }
}

impl Display for ReturnStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Return Model
#[derive(Debug, Clone)]
pub struct Return {
    pub uuid: ReturnUuid,
    pub order_uuid: OrderUuid,
    pub order_number: String,
    pub user_uuid: UserUuid,
    pub return_number: String,
    pub reason: String,
    pub description: String,
    pub images: Vec<String>,
    pub status: ReturnStatus,
    pub admin_notes: Option<String>,
    pub refund_amount: Option<u64>,
    pub processed_by: Option<UserUuid>,
    pub processed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Snapshot of an affected order item, copied at return creation.
#[derive(Debug, Clone)]
pub struct ReturnItem {
    pub uuid: ReturnItemUuid,
    pub return_uuid: ReturnUuid,
    pub order_item_uuid: OrderItemUuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
}

/// A return with its item snapshots.
#[derive(Debug, Clone)]
pub struct ReturnDetails {
    pub retrn: Return,
    pub items: Vec<ReturnItem>,
}

/// Customer return request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReturn {
    pub order_uuid: OrderUuid,
    pub reason: String,
    pub description: String,
    pub images: Vec<String>,
    /// Order items to return; empty means all items of the order.
    pub items: Vec<OrderItemUuid>,
}

/// Result of a successful return request.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedReturn {
    pub uuid: ReturnUuid,
    pub return_number: String,
}

/// Staff decision applied to a return.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnDecision {
    pub status: ReturnStatus,
    pub admin_notes: Option<String>,
    pub refund_amount: Option<u64>,
}
