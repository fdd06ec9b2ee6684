//! Gross-income validation.
//!
//! Every entry point funnels through [`validate_income`] before any tax
//! arithmetic happens, so an invalid amount never yields a partial result.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::InvalidInputError;

/// Largest accepted gross income (₹10^15). Keeps every slab product and the
/// cess well inside `Decimal` range.
pub const MAX_INCOME: Decimal = dec!(1000000000000000);

/// Accepts amounts from zero up to [`MAX_INCOME`] inclusive.
///
/// A negative zero is normalised to plain zero.
pub fn validate_income(income: Decimal) -> Result<Decimal, InvalidInputError> {
    if income.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if income.is_sign_negative() {
        return Err(InvalidInputError::Negative(income));
    }
    if income > MAX_INCOME {
        return Err(InvalidInputError::ExceedsMaximum(income));
    }
    Ok(income)
}

/// Converts a floating-point amount, rejecting NaN and infinities.
pub fn income_from_f64(income: f64) -> Result<Decimal, InvalidInputError> {
    if !income.is_finite() {
        return Err(InvalidInputError::NotFinite(income));
    }
    let value = Decimal::try_from(income).map_err(|_| InvalidInputError::OutOfRange(income))?;
    validate_income(value)
}

/// Parses a user-supplied amount such as `1500000`, `15,00,000` or `₹ 9,25,000.50`.
///
/// Digit-group separators (`,` and `_`), a leading rupee sign and surrounding
/// whitespace are ignored.
pub fn parse_income(text: &str) -> Result<Decimal, InvalidInputError> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(InvalidInputError::NotNumeric(text.to_string()));
    }

    let value =
        Decimal::from_str(&cleaned).map_err(|_| InvalidInputError::NotNumeric(text.to_string()))?;
    validate_income(value)
}
