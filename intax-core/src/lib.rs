pub mod calculations;
pub mod error;
pub mod models;
pub mod rules;

pub use calculations::{MAX_INCOME, RegimeComparator, TaxEngine, income_from_f64, parse_income};
pub use error::{InvalidInputError, RuleSetError};
pub use models::*;

use rust_decimal::Decimal;

/// Computes tax under the built-in rule set.
///
/// ```
/// use rust_decimal_macros::dec;
/// use intax_core::{Regime, compute_tax};
///
/// let result = compute_tax(dec!(1000000), Regime::New).unwrap();
/// assert_eq!(result.total_tax, dec!(0));
/// ```
pub fn compute_tax(
    annual_gross_income: Decimal,
    regime: Regime,
) -> Result<TaxCalculationResult, InvalidInputError> {
    TaxEngine::new(rules::default_rules()).compute_tax(annual_gross_income, regime)
}

/// Compares both regimes under the built-in rule set.
pub fn compare_regimes(annual_gross_income: Decimal) -> Result<ComparisonResult, InvalidInputError> {
    RegimeComparator::new(rules::default_rules()).compare(annual_gross_income)
}
