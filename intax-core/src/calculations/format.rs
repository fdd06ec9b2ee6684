//! Indian-style number formatting (`12,34,567`).

use rust_decimal::{Decimal, RoundingStrategy};

/// Groups the integer part as lakhs and crores: the last three digits, then
/// pairs. Up to three fractional digits are kept, trailing zeros dropped.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use intax_core::calculations::format::group_indian;
///
/// assert_eq!(group_indian(dec!(400000)), "4,00,000");
/// assert_eq!(group_indian(dec!(12345678.5)), "1,23,45,678.5");
/// assert_eq!(group_indian(dec!(999)), "999");
/// ```
pub fn group_indian(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 2 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_integer(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// `group_indian` with a leading rupee sign.
pub fn rupees(value: Decimal) -> String {
    format!("₹{}", group_indian(value))
}

/// Percentage without trailing zeros, e.g. `4` or `2.5`.
pub fn percent(value: Decimal) -> String {
    value.normalize().to_string()
}

fn group_integer(integer: &str) -> String {
    if integer.len() <= 3 {
        return integer.to_string();
    }

    let (head, tail) = integer.split_at(integer.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
