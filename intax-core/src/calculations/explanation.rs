//! Plain-text summary attached to every [`TaxCalculationResult`].
//!
//! Pure formatting over amounts the engine has already computed.
//!
//! [`TaxCalculationResult`]: crate::models::TaxCalculationResult

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::calculations::common::round_to_rupee;
use crate::calculations::format::{percent, rupees};
use crate::models::Regime;

const MONTHS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Amounts the summary is built from. `total_tax` is the unrounded liability.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExplanationParts {
    pub regime: Regime,
    pub annual_gross_income: Decimal,
    pub standard_deduction: Decimal,
    pub taxable_income: Decimal,
    pub cess_rate_percent: Decimal,
    pub rebate: Decimal,
    pub total_tax: Decimal,
}

pub(crate) fn explain(parts: &ExplanationParts) -> String {
    let take_home = parts.annual_gross_income - parts.total_tax;

    let mut text = format!("Under the {} Tax Regime:\n", parts.regime.label());
    let _ = writeln!(text, "• Annual CTC: {}", rupees(parts.annual_gross_income));
    let _ = writeln!(
        text,
        "• Standard Deduction: {}",
        rupees(parts.standard_deduction)
    );
    let _ = writeln!(text, "• Taxable Income: {}", rupees(parts.taxable_income));
    let _ = writeln!(
        text,
        "• Total Tax (including {}% cess): {}",
        percent(parts.cess_rate_percent),
        rupees(round_to_rupee(parts.total_tax))
    );
    if parts.rebate > Decimal::ZERO {
        let _ = writeln!(
            text,
            "• Rebate u/s 87A: {} (Tax reduced to zero)",
            rupees(parts.rebate)
        );
    }
    let _ = writeln!(
        text,
        "• Monthly Tax: {}",
        rupees(round_to_rupee(parts.total_tax / MONTHS))
    );
    let _ = writeln!(
        text,
        "• Annual Take-Home: {}",
        rupees(round_to_rupee(take_home))
    );
    let _ = write!(
        text,
        "• Monthly Take-Home: {}",
        rupees(round_to_rupee(take_home / MONTHS))
    );
    text
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn explain_full_rebate() {
        let text = explain(&ExplanationParts {
            regime: Regime::New,
            annual_gross_income: dec!(1000000),
            standard_deduction: dec!(75000),
            taxable_income: dec!(925000),
            cess_rate_percent: dec!(4),
            rebate: dec!(33800),
            total_tax: dec!(0),
        });

        assert_eq!(
            text,
            "Under the New Tax Regime:\n\
             • Annual CTC: ₹10,00,000\n\
             • Standard Deduction: ₹75,000\n\
             • Taxable Income: ₹9,25,000\n\
             • Total Tax (including 4% cess): ₹0\n\
             • Rebate u/s 87A: ₹33,800 (Tax reduced to zero)\n\
             • Monthly Tax: ₹0\n\
             • Annual Take-Home: ₹10,00,000\n\
             • Monthly Take-Home: ₹83,333"
        );
    }

    #[test]
    fn explain_without_rebate_omits_rebate_line() {
        let text = explain(&ExplanationParts {
            regime: Regime::Old,
            annual_gross_income: dec!(2000000),
            standard_deduction: dec!(50000),
            taxable_income: dec!(1950000),
            cess_rate_percent: dec!(4),
            rebate: dec!(0),
            total_tax: dec!(413400),
        });

        assert!(!text.contains("Rebate"));
        assert!(text.starts_with("Under the Old Tax Regime:\n"));
        assert!(text.contains("• Total Tax (including 4% cess): ₹4,13,400\n"));
        assert!(text.contains("• Monthly Tax: ₹34,450\n"));
        assert!(text.contains("• Annual Take-Home: ₹15,86,600\n"));
        assert!(text.ends_with("• Monthly Take-Home: ₹1,32,217"));
    }

    #[test]
    fn explain_partial_rebate_keeps_rebate_note() {
        let text = explain(&ExplanationParts {
            regime: Regime::New,
            annual_gross_income: dec!(1275000),
            standard_deduction: dec!(75000),
            taxable_income: dec!(1200000),
            cess_rate_percent: dec!(4),
            rebate: dec!(60000),
            total_tax: dec!(2400),
        });

        assert!(text.contains("• Rebate u/s 87A: ₹60,000 (Tax reduced to zero)\n"));
        assert!(text.contains("• Total Tax (including 4% cess): ₹2,400\n"));
    }
}
