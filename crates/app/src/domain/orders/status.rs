//! Order lifecycle enums and the transition policy.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::domain::fields::UnknownValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Ready,
    Delivering,
    Completed,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Ready => "ready",
            Self::Delivering => "delivering",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "ready" => Ok(Self::Ready),
            "delivering" => Ok(Self::Delivering),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownValue::new("status", other)),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMethod {
    DineIn,
    Takeaway,
    Delivery,
}

impl DeliveryMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DineIn => "dine_in",
            Self::Takeaway => "takeaway",
            Self::Delivery => "delivery",
        }
    }
}

impl FromStr for DeliveryMethod {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dine_in" => Ok(Self::DineIn),
            "takeaway" => Ok(Self::Takeaway),
            "delivery" => Ok(Self::Delivery),
            other => Err(UnknownValue::new("delivery_method", other)),
        }
    }
}

impl Display for DeliveryMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Rejected,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownValue::new("payment_status", other)),
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Whether status transitions validate the prior state.
///
/// `Permissive` accepts any of the seven statuses from any prior state.
/// `Strict` enforces the forward chain, allows skipping `delivering`
/// for orders that are picked up, and reaches `cancelled` only from
/// non-terminal states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    #[must_use]
    pub fn allows(self, from: OrderStatus, to: OrderStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::Strict => {
                if to == OrderStatus::Cancelled {
                    return !from.is_terminal();
                }

                matches!(
                    (from, to),
                    (OrderStatus::Pending, OrderStatus::Confirmed)
                        | (OrderStatus::Confirmed, OrderStatus::Processing)
                        | (OrderStatus::Processing, OrderStatus::Ready)
                        | (OrderStatus::Ready, OrderStatus::Delivering)
                        | (OrderStatus::Ready | OrderStatus::Delivering, OrderStatus::Completed)
                )
            }
        }
    }
}
