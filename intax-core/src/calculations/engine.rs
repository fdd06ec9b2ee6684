//! Progressive income-tax computation for a single regime.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1 | Taxable income = gross − standard deduction, floored at 0 |
//! | 2 | Walk the bracket table; each slab taxes the portion of income inside it |
//! | 3 | Cess = bracket subtotal × cess rate |
//! | 4 | Rebate = min(subtotal + cess, maximum rebate) when taxable income ≤ threshold |
//! | 5 | Total = subtotal + cess − rebate, rounded to the rupee |
//! | 6 | Effective rate = unrounded total ÷ gross × 100, two decimals |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use intax_core::calculations::TaxEngine;
//! use intax_core::models::Regime;
//! use intax_core::rules::fy2025_26;
//!
//! let engine = TaxEngine::new(fy2025_26());
//! let result = engine.compute_tax(dec!(2000000), Regime::Old).unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(1950000));
//! assert_eq!(result.total_tax, dec!(413400));
//! assert_eq!(result.effective_tax_rate_percent, dec!(20.67));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{max, percent_of, round_half_up, round_to_rupee};
use crate::calculations::explanation::{ExplanationParts, explain};
use crate::calculations::format::rupees;
use crate::calculations::input::validate_income;
use crate::error::InvalidInputError;
use crate::models::{
    BracketBreakdown, BracketTable, Regime, TaxBracket, TaxCalculationInput,
    TaxCalculationResult, TaxYearConfig,
};

/// Computes tax against a borrowed rule set.
///
/// Holds no mutable state; one engine can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> TaxEngine<'a> {
    /// The rule set is expected to have passed [`TaxYearConfig::validate`].
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a TaxYearConfig {
        self.config
    }

    /// Computes the liability for `annual_gross_income` under `regime`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Negative`] for income below zero. Nothing
    /// is computed in that case.
    pub fn compute_tax(
        &self,
        annual_gross_income: Decimal,
        regime: Regime,
    ) -> Result<TaxCalculationResult, InvalidInputError> {
        let gross = validate_income(annual_gross_income)?;
        let rules = self.config.rules(regime);

        let taxable_income = self.taxable_income(gross, rules.standard_deduction);
        let (bracket_tax, breakdown) = self.walk_brackets(&rules.brackets, taxable_income);

        let cess = percent_of(bracket_tax, self.config.cess_rate_percent);
        let tax_before_rebate = bracket_tax + cess;
        let rebate = rules.rebate.rebate_for(taxable_income, tax_before_rebate);
        let total_tax = tax_before_rebate - rebate;

        let effective_tax_rate_percent = self.effective_rate(total_tax, gross);

        debug!(
            %regime,
            %gross,
            %taxable_income,
            %bracket_tax,
            %cess,
            %rebate,
            %total_tax,
            "computed tax"
        );

        let explanation = explain(&ExplanationParts {
            regime,
            annual_gross_income: gross,
            standard_deduction: rules.standard_deduction,
            taxable_income,
            cess_rate_percent: self.config.cess_rate_percent,
            rebate,
            total_tax,
        });

        Ok(TaxCalculationResult {
            regime,
            annual_gross_income: gross,
            standard_deduction: rules.standard_deduction,
            taxable_income,
            cess,
            rebate,
            total_tax: round_to_rupee(total_tax),
            effective_tax_rate_percent,
            breakdown,
            explanation,
        })
    }

    /// Convenience wrapper taking a pre-validated input.
    pub fn compute(
        &self,
        input: &TaxCalculationInput,
    ) -> Result<TaxCalculationResult, InvalidInputError> {
        self.compute_tax(input.annual_gross_income, input.regime)
    }

    /// Gross income minus the standard deduction, never below zero.
    fn taxable_income(
        &self,
        gross: Decimal,
        standard_deduction: Decimal,
    ) -> Decimal {
        max(gross - standard_deduction, Decimal::ZERO)
    }

    /// Sums the tax of every slab and records a line for each slab the
    /// income reaches, including zero-rate slabs.
    fn walk_brackets(
        &self,
        brackets: &BracketTable,
        taxable_income: Decimal,
    ) -> (Decimal, Vec<BracketBreakdown>) {
        let mut total = Decimal::ZERO;
        let mut breakdown = Vec::new();

        for bracket in brackets {
            let portion = bracket.taxable_portion(taxable_income);
            if portion <= Decimal::ZERO {
                continue;
            }

            let tax_amount = percent_of(portion, bracket.rate_percent);
            total += tax_amount;
            breakdown.push(BracketBreakdown {
                bracket_label: bracket_label(bracket),
                rate_percent: bracket.rate_percent,
                tax_amount,
            });
        }

        (total, breakdown)
    }

    /// Total tax as a percentage of gross income, two decimals; 0 for no income.
    fn effective_rate(
        &self,
        total_tax: Decimal,
        gross: Decimal,
    ) -> Decimal {
        if gross > Decimal::ZERO {
            round_half_up(total_tax / gross * Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        }
    }
}

/// Display label for a slab, e.g. `₹4,00,000 - ₹8,00,000` or `₹24,00,000 - Above`.
pub fn bracket_label(bracket: &TaxBracket) -> String {
    match bracket.max_income {
        Some(max) => format!("{} - {}", rupees(bracket.min_income), rupees(max)),
        None => format!("{} - Above", rupees(bracket.min_income)),
    }
}
