//! Discount amount computation for a validated redeem code.

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::domain::promotions::models::{DiscountType, RedeemCode};

/// Compute the discount a code grants on the given subtotal.
///
/// Returns `None` when the subtotal is below the code's minimum
/// purchase. Percentage codes are clamped to `max_discount` when one is
/// set; fixed codes apply their value directly and may exceed the
/// subtotal (the order total's floor at zero absorbs that).
#[must_use]
pub fn compute(code: &RedeemCode, subtotal: u64) -> Option<u64> {
    if subtotal < code.min_purchase {
        return None;
    }

    let discount = match code.discount_type {
        DiscountType::Percentage => {
            let raw = (Decimal::from(subtotal) * code.discount_value / Decimal::ONE_HUNDRED)
                .floor()
                .to_u64()
                .unwrap_or(0);

            match code.max_discount {
                Some(cap) => raw.min(cap),
                None => raw,
            }
        }
        DiscountType::Fixed => code.discount_value.floor().to_u64().unwrap_or(0),
    };

    Some(discount)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::domain::promotions::models::RedeemCodeUuid;

    use super::*;

    fn code(discount_type: DiscountType, value: u32) -> RedeemCode {
        RedeemCode {
            uuid: RedeemCodeUuid::new(),
            code: "SAVE10".to_string(),
            discount_type,
            discount_value: Decimal::from(value),
            min_purchase: 0,
            max_discount: None,
            start_date: date(2024, 1, 1),
            end_date: date(2030, 12, 31),
            usage_limit: None,
            used_count: 0,
            is_active: true,
        }
    }

    #[test]
    fn percentage_discount_is_clamped_to_cap() {
        let mut save10 = code(DiscountType::Percentage, 10);
        save10.max_discount = Some(3_000);

        // 10% of 50_000 is 5_000, capped at 3_000
        assert_eq!(compute(&save10, 50_000), Some(3_000));
    }

    #[test]
    fn percentage_discount_without_cap() {
        let save10 = code(DiscountType::Percentage, 10);

        assert_eq!(compute(&save10, 50_000), Some(5_000));
    }

    #[test]
    fn fixed_discount_applies_value_directly() {
        let fixed = code(DiscountType::Fixed, 7_500);

        assert_eq!(compute(&fixed, 50_000), Some(7_500));
    }

    #[test]
    fn fixed_discount_may_exceed_subtotal() {
        let fixed = code(DiscountType::Fixed, 60_000);

        assert_eq!(compute(&fixed, 50_000), Some(60_000));
    }

    #[test]
    fn below_min_purchase_yields_no_discount() {
        let mut save10 = code(DiscountType::Percentage, 10);
        save10.min_purchase = 100_000;

        assert_eq!(compute(&save10, 50_000), None);
    }

    #[test]
    fn percentage_rounds_down_to_whole_rupiah() {
        let odd = code(DiscountType::Percentage, 3);

        // 3% of 12_345 is 370.35
        assert_eq!(compute(&odd, 12_345), Some(370));
    }
}
