//! Common rounding helpers for payroll amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(4.754)), dec!(4.75));
/// assert_eq!(round_half_up(dec!(4.755)), dec!(4.76));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Rounds down to a multiple of 10 won.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::floor_to_ten;
///
/// assert_eq!(floor_to_ten(dec!(14171.49)), dec!(14170));
/// ```
pub fn floor_to_ten(value: Decimal) -> Decimal {
    let ten = Decimal::TEN;
    (value / ten).floor() * ten
}

/// Rounds down to a whole won.
pub fn floor_won(value: Decimal) -> Decimal {
    value.floor()
}

/// Rounds to the nearest whole won, halves away from zero.
pub fn round_won(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Expresses `part` as a percentage of `whole` with two decimal places.
///
/// Returns a plain zero when `whole` is zero or negative.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(142500), dec!(3000000)).to_string(), "4.75");
/// assert_eq!(percent_of(dec!(1), dec!(0)).to_string(), "0");
/// ```
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let mut percent = round_half_up(part / whole * Decimal::ONE_HUNDRED);
    percent.rescale(2);
    percent
}
