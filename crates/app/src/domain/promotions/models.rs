//! Redeem Code Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::{domain::fields::UnknownValue, uuids::TypedUuid};

/// Redeem Code UUID
pub type RedeemCodeUuid = TypedUuid<RedeemCode>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl DiscountType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

impl FromStr for DiscountType {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            other => Err(UnknownValue::new("discount_type", other)),
        }
    }
}

impl Display for DiscountType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Redeem Code Model
#[derive(Debug, Clone)]
pub struct RedeemCode {
    pub uuid: RedeemCodeUuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_purchase: u64,
    pub max_discount: Option<u64>,
    /// Validity window, inclusive on both ends, date granularity.
    pub start_date: Date,
    pub end_date: Date,
    pub usage_limit: Option<i64>,
    pub used_count: i64,
    pub is_active: bool,
}
