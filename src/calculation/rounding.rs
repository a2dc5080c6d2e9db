//! Money rounding for presentation.
//!
//! Calculations keep full precision; these helpers are applied only when a
//! figure is shown to an operator or written to an export.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places money is displayed with.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds a value to cents, half to even.
///
/// # Examples
///
/// ```
/// use payroll_ledger::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("2.675").unwrap()), Decimal::from_str("2.68").unwrap());
/// assert_eq!(round_money(Decimal::from_str("2.665").unwrap()), Decimal::from_str("2.66").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

/// Formats a value with exactly two decimal places.
///
/// # Examples
///
/// ```
/// use payroll_ledger::calculation::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::new(750, 0)), "750.00");
/// assert_eq!(format_money(Decimal::new(12345, 4)), "1.23");
/// ```
pub fn format_money(value: Decimal) -> String {
    let rounded = round_money(value);
    // A value that rounds to zero must not print as "-0.00".
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("{:.prec$}", rounded, prec = MONEY_DECIMAL_PLACES as usize)
}
