//! Pure redemption and accrual arithmetic.

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::domain::loyalty::{errors::InsufficientPoints, models::LoyaltySettings};

/// Outcome of a redemption request.
///
/// `points_charged` is the full requested amount, while the discount is
/// derived from the possibly smaller capped amount. Charging the excess
/// is inherited source behavior and deliberately not corrected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redemption {
    pub points_charged: i64,
    pub discount: u64,
}

impl Redemption {
    const NONE: Self = Self {
        points_charged: 0,
        discount: 0,
    };
}

/// Resolve a redemption request against the balance and active settings.
///
/// Requesting more than the balance is a hard failure. Requesting fewer
/// points than the configured minimum, or redeeming with no active
/// settings, silently yields no discount.
///
/// # Errors
///
/// Returns [`InsufficientPoints`] when `requested` exceeds `balance`.
pub fn redemption(
    requested: i64,
    balance: i64,
    settings: Option<&LoyaltySettings>,
) -> Result<Redemption, InsufficientPoints> {
    if requested <= 0 {
        return Ok(Redemption::NONE);
    }

    if requested > balance {
        return Err(InsufficientPoints);
    }

    let Some(settings) = settings else {
        return Ok(Redemption::NONE);
    };

    if requested < settings.min_points_redeem {
        return Ok(Redemption::NONE);
    }

    let actual = settings
        .max_points_per_order
        .map_or(requested, |cap| requested.min(cap));

    let discount = (Decimal::from(actual) * settings.rupiah_per_point)
        .floor()
        .to_u64()
        .unwrap_or(0);

    Ok(Redemption {
        points_charged: requested,
        discount,
    })
}

/// Points accrued when an order worth `total` completes.
#[must_use]
pub fn points_earned(total: u64, settings: &LoyaltySettings) -> i64 {
    (Decimal::from(total) * settings.points_per_rupiah)
        .floor()
        .to_i64()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn settings() -> LoyaltySettings {
        LoyaltySettings {
            points_per_rupiah: Decimal::new(1, 2), // 0.01
            rupiah_per_point: Decimal::from(10),
            min_points_redeem: 50,
            max_points_per_order: None,
        }
    }

    #[test]
    fn redemption_above_minimum_discounts_at_rate() {
        // 60 points at 10 rupiah per point from a balance of 100
        let redemption = redemption(60, 100, Some(&settings())).expect("balance is sufficient");

        assert_eq!(redemption.discount, 600);
        assert_eq!(redemption.points_charged, 60);
    }

    #[test]
    fn redemption_below_minimum_is_silently_ignored() {
        let redemption = redemption(40, 100, Some(&settings())).expect("balance is sufficient");

        assert_eq!(redemption, Redemption::NONE);
    }

    #[test]
    fn redemption_over_balance_is_a_hard_failure() {
        assert_eq!(redemption(120, 100, Some(&settings())), Err(InsufficientPoints));
    }

    #[test]
    fn per_order_cap_limits_the_discount_but_not_the_charge() {
        let mut capped = settings();
        capped.max_points_per_order = Some(75);

        let redemption = redemption(100, 200, Some(&capped)).expect("balance is sufficient");

        // discount reflects the capped 75 points, yet all 100 are charged
        assert_eq!(redemption.discount, 750);
        assert_eq!(redemption.points_charged, 100);
    }

    #[test]
    fn redemption_without_settings_yields_nothing() {
        let redemption = redemption(60, 100, None).expect("balance is sufficient");

        assert_eq!(redemption, Redemption::NONE);
    }

    #[test]
    fn accrual_floors_fractional_points() {
        assert_eq!(points_earned(47_000, &settings()), 470);
        assert_eq!(points_earned(47_050, &settings()), 470);
        assert_eq!(points_earned(99, &settings()), 0);
    }

    #[test]
    fn zero_rate_accrues_nothing() {
        let mut idle = settings();
        idle.points_per_rupiah = Decimal::ZERO;

        assert_eq!(points_earned(47_000, &idle), 0);
    }
}
