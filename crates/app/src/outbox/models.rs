//! Outbox Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Outbox Event UUID
pub type OutboxEventUuid = TypedUuid<OutboxEvent>;

/// Event kind for the order-completed email.
pub const ORDER_COMPLETED: &str = "order_completed";

/// Outbox Event Model
#[derive(Debug, Clone)]
pub struct OutboxEvent {
    pub uuid: OutboxEventUuid,
    pub kind: String,
    /// JSON-serialized payload, shaped by `kind`.
    pub payload: String,
    pub created_at: Timestamp,
    pub dispatched_at: Option<Timestamp>,
}

/// Payload of an [`ORDER_COMPLETED`] event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCompletedEmail {
    pub to: String,
    pub name: String,
    pub order_number: String,
    pub total: u64,
}
