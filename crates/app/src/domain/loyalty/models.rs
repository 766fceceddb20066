//! Loyalty Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{fields::UnknownValue, orders::models::OrderUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Loyalty Transaction UUID
pub type LoyaltyTransactionUuid = TypedUuid<LoyaltyTransaction>;

/// Active earn/redeem rates. Loaded once per workflow transaction and
/// handed to the pure computations.
#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltySettings {
    /// Points earned per rupiah of completed order total.
    pub points_per_rupiah: Decimal,
    /// Rupiah of discount per redeemed point.
    pub rupiah_per_point: Decimal,
    pub min_points_redeem: i64,
    pub max_points_per_order: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Earn,
    Redeem,
}

impl TransactionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earn => "earn",
            Self::Redeem => "redeem",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "earn" => Ok(Self::Earn),
            "redeem" => Ok(Self::Redeem),
            other => Err(UnknownValue::new("kind", other)),
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Append-only ledger entry. The signed `points` delta sums to the
/// user's denormalized balance.
#[derive(Debug, Clone)]
pub struct LoyaltyTransaction {
    pub uuid: LoyaltyTransactionUuid,
    pub user_uuid: UserUuid,
    pub order_uuid: Option<OrderUuid>,
    pub kind: TransactionKind,
    pub points: i64,
    pub description: Option<String>,
    pub balance_before: i64,
    pub balance_after: i64,
    pub created_at: Timestamp,
}

/// Balance plus one page of ledger history.
#[derive(Debug, Clone)]
pub struct LoyaltySummary {
    pub balance: i64,
    pub transactions: Vec<LoyaltyTransaction>,
    pub total_transactions: u64,
}
