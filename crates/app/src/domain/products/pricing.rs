//! Line price computation.
//!
//! A line's unit price is the product base price plus the adjustment of
//! each selected variant. A variant that is absent or did not match any
//! configured row contributes nothing.

#[must_use]
pub fn quote(
    base_price: u64,
    size_adjustment: Option<i64>,
    temperature_adjustment: Option<i64>,
) -> u64 {
    let adjusted = i64::try_from(base_price)
        .unwrap_or(i64::MAX)
        .saturating_add(size_adjustment.unwrap_or(0))
        .saturating_add(temperature_adjustment.unwrap_or(0));

    u64::try_from(adjusted).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_price_without_variants() {
        assert_eq!(quote(25_000, None, None), 25_000);
    }

    #[test]
    fn adjustments_are_added_independently() {
        assert_eq!(quote(25_000, Some(5_000), None), 30_000);
        assert_eq!(quote(25_000, None, Some(2_000)), 27_000);
        assert_eq!(quote(25_000, Some(5_000), Some(2_000)), 32_000);
    }

    #[test]
    fn negative_adjustments_reduce_the_price() {
        assert_eq!(quote(25_000, Some(-3_000), None), 22_000);
    }

    #[test]
    fn price_never_goes_below_zero() {
        assert_eq!(quote(1_000, Some(-5_000), None), 0);
    }
}
