use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RuleSetError;
use crate::models::{BracketTable, RebateRule, Regime};

/// Everything that distinguishes one regime from the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeRules {
    pub standard_deduction: Decimal,
    pub brackets: BracketTable,
    pub rebate: RebateRule,
}

impl RegimeRules {
    /// Validates the bracket table, deduction and rebate for `regime`.
    pub fn validate(
        &self,
        regime: Regime,
    ) -> Result<(), RuleSetError> {
        self.brackets.validate(regime)?;
        if self.standard_deduction < Decimal::ZERO {
            return Err(RuleSetError::NegativeDeduction {
                regime,
                amount: self.standard_deduction,
            });
        }
        if self.rebate.income_threshold < Decimal::ZERO || self.rebate.max_rebate < Decimal::ZERO {
            return Err(RuleSetError::NegativeRebate { regime });
        }
        Ok(())
    }
}

/// The complete rule set for a single tax year.
///
/// Treated as immutable configuration: built once (from the built-in tables
/// or from files) and shared by reference with every computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    /// Display label, e.g. `FY 2025-26`.
    pub tax_year: String,
    /// Health and education cess applied on the bracket subtotal.
    pub cess_rate_percent: Decimal,
    pub old: RegimeRules,
    pub new: RegimeRules,
}

impl TaxYearConfig {
    pub fn rules(
        &self,
        regime: Regime,
    ) -> &RegimeRules {
        match regime {
            Regime::Old => &self.old,
            Regime::New => &self.new,
        }
    }

    /// Validates the cess rate and both regimes.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleSetError`] found, checking the cess rate, then
    /// the old regime, then the new regime.
    pub fn validate(&self) -> Result<(), RuleSetError> {
        if self.cess_rate_percent < Decimal::ZERO || self.cess_rate_percent > Decimal::ONE_HUNDRED {
            return Err(RuleSetError::InvalidCessRate(self.cess_rate_percent));
        }
        for regime in Regime::ALL {
            self.rules(regime).validate(regime)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::rules::fy2025_26;

    #[test]
    fn rules_selects_matching_regime() {
        let config = fy2025_26();

        assert_eq!(config.rules(Regime::Old).standard_deduction, dec!(50000));
        assert_eq!(config.rules(Regime::New).standard_deduction, dec!(75000));
    }

    #[test]
    fn validate_rejects_negative_cess() {
        let mut config = fy2025_26().clone();
        config.cess_rate_percent = dec!(-1);

        assert_eq!(
            config.validate(),
            Err(RuleSetError::InvalidCessRate(dec!(-1)))
        );
    }

    #[test]
    fn validate_rejects_negative_deduction() {
        let mut config = fy2025_26().clone();
        config.new.standard_deduction = dec!(-75000);

        assert_eq!(
            config.validate(),
            Err(RuleSetError::NegativeDeduction {
                regime: Regime::New,
                amount: dec!(-75000),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_rebate() {
        let mut config = fy2025_26().clone();
        config.old.rebate.max_rebate = dec!(-1);

        assert_eq!(
            config.validate(),
            Err(RuleSetError::NegativeRebate {
                regime: Regime::Old
            })
        );
    }

    #[test]
    fn validate_reports_bracket_errors_with_regime() {
        let mut config = fy2025_26().clone();
        config.old.brackets = BracketTable::new(vec![]);

        assert_eq!(
            config.validate(),
            Err(RuleSetError::EmptyBracketTable(Regime::Old))
        );
    }
}
