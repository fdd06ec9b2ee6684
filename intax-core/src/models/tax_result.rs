use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::input::validate_income;
use crate::error::InvalidInputError;
use crate::models::Regime;

/// A validated request to compute tax for one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationInput {
    pub annual_gross_income: Decimal,
    pub regime: Regime,
}

impl TaxCalculationInput {
    /// Builds an input, rejecting negative income.
    pub fn new(
        annual_gross_income: Decimal,
        regime: Regime,
    ) -> Result<Self, InvalidInputError> {
        Ok(Self {
            annual_gross_income: validate_income(annual_gross_income)?,
            regime,
        })
    }
}

/// One line of the slab-by-slab breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketBreakdown {
    /// e.g. `₹4,00,000 - ₹8,00,000` or `₹24,00,000 - Above`.
    pub bracket_label: String,
    pub rate_percent: Decimal,
    /// Unrounded tax attributable to this slab, before cess.
    pub tax_amount: Decimal,
}

/// Outcome of a single-regime computation.
///
/// `total_tax` is rounded to the whole rupee while breakdown amounts are
/// not, so the breakdown plus cess need not add up to the displayed total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub regime: Regime,
    pub annual_gross_income: Decimal,
    pub standard_deduction: Decimal,
    pub taxable_income: Decimal,
    /// Cess on the bracket subtotal, unrounded.
    pub cess: Decimal,
    /// Rebate applied after cess, unrounded.
    pub rebate: Decimal,
    pub total_tax: Decimal,
    pub effective_tax_rate_percent: Decimal,
    pub breakdown: Vec<BracketBreakdown>,
    pub explanation: String,
}

/// Both regimes side by side, with the cheaper one called out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub old: TaxCalculationResult,
    pub new: TaxCalculationResult,
    /// `old.total_tax - new.total_tax`; positive when the new regime is cheaper.
    pub savings: Decimal,
    /// `None` when both regimes cost the same.
    pub recommended: Option<Regime>,
    pub recommendation: String,
}

impl ComparisonResult {
    pub fn result_for(
        &self,
        regime: Regime,
    ) -> &TaxCalculationResult {
        match regime {
            Regime::Old => &self.old,
            Regime::New => &self.new,
        }
    }
}
