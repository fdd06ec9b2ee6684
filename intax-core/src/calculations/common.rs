//! Rounding and percentage helpers shared by the engine and the comparator.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, halves away from zero.
///
/// Used for percentages such as the effective tax rate.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use intax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(20.665)), dec!(20.67));
/// assert_eq!(round_half_up(dec!(20.664)), dec!(20.66));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the nearest whole rupee, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use intax_core::calculations::common::round_to_rupee;
///
/// assert_eq!(round_to_rupee(dec!(62400.156)), dec!(62400));
/// assert_eq!(round_to_rupee(dec!(83333.5)), dec!(83334));
/// ```
pub fn round_to_rupee(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `amount × rate_percent / 100`, unrounded.
pub fn percent_of(
    amount: Decimal,
    rate_percent: Decimal,
) -> Decimal {
    amount * rate_percent / Decimal::ONE_HUNDRED
}

/// Returns the larger of two values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(10.005)), dec!(10.01));
    }

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(10.0049)), dec!(10.00));
    }

    #[test]
    fn round_half_up_preserves_short_values() {
        assert_eq!(round_half_up(dec!(6.5)), dec!(6.5));
    }

    // =========================================================================
    // round_to_rupee tests
    // =========================================================================

    #[test]
    fn round_to_rupee_rounds_half_up() {
        assert_eq!(round_to_rupee(dec!(2400.5)), dec!(2401));
    }

    #[test]
    fn round_to_rupee_rounds_down_below_half() {
        assert_eq!(round_to_rupee(dec!(2400.49)), dec!(2400));
    }

    #[test]
    fn round_to_rupee_handles_zero() {
        assert_eq!(round_to_rupee(dec!(0)), dec!(0));
    }

    // =========================================================================
    // percent_of tests
    // =========================================================================

    #[test]
    fn percent_of_applies_percentage() {
        assert_eq!(percent_of(dec!(397500), dec!(4)), dec!(15900));
    }

    #[test]
    fn percent_of_keeps_fractions() {
        assert_eq!(percent_of(dec!(1), dec!(5)), dec!(0.05));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(-50000), dec!(0)), dec!(0));
        assert_eq!(max(dec!(925000), dec!(0)), dec!(925000));
    }
}
