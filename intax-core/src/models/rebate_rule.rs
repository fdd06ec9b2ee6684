use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Section 87A style rebate: tax is forgiven up to `max_rebate` when taxable
/// income does not exceed `income_threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateRule {
    pub income_threshold: Decimal,
    pub max_rebate: Decimal,
}

impl RebateRule {
    /// Rebate owed against `tax_before_rebate`.
    ///
    /// Never exceeds the tax itself, so applying it cannot produce a negative
    /// liability.
    pub fn rebate_for(
        &self,
        taxable_income: Decimal,
        tax_before_rebate: Decimal,
    ) -> Decimal {
        if taxable_income <= self.income_threshold {
            tax_before_rebate.min(self.max_rebate).max(Decimal::ZERO)
        } else {
            Decimal::ZERO
        }
    }
}
