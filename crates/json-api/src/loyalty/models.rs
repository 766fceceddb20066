//! Loyalty response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dailybrew_app::domain::loyalty::models::{LoyaltySummary, LoyaltyTransaction};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LoyaltyTransactionResponse {
    pub uuid: Uuid,
    pub order_uuid: Option<Uuid>,
    pub kind: String,
    pub points: i64,
    pub description: Option<String>,
    pub balance_before: i64,
    pub balance_after: i64,
    pub created_at: String,
}

impl From<LoyaltyTransaction> for LoyaltyTransactionResponse {
    fn from(transaction: LoyaltyTransaction) -> Self {
        Self {
            uuid: transaction.uuid.into_uuid(),
            order_uuid: transaction.order_uuid.map(Into::into),
            kind: transaction.kind.to_string(),
            points: transaction.points,
            description: transaction.description,
            balance_before: transaction.balance_before,
            balance_after: transaction.balance_after,
            created_at: transaction.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LoyaltySummaryResponse {
    pub balance: i64,
    pub transactions: Vec<LoyaltyTransactionResponse>,
}

impl From<LoyaltySummary> for LoyaltySummaryResponse {
    fn from(summary: LoyaltySummary) -> Self {
        Self {
            balance: summary.balance,
            transactions: summary.transactions.into_iter().map(Into::into).collect(),
        }
    }
}
