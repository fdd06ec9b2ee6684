use std::sync::OnceLock;

use rust_decimal_macros::dec;

use crate::models::{BracketTable, RebateRule, RegimeRules, TaxBracket, TaxYearConfig};

static FY2025_26: OnceLock<TaxYearConfig> = OnceLock::new();

/// Indian income-tax rules for FY 2025-26 (Budget 2025 slabs for the new
/// regime). Built on first use and shared for the life of the process.
pub fn fy2025_26() -> &'static TaxYearConfig {
    FY2025_26.get_or_init(build)
}

fn build() -> TaxYearConfig {
    TaxYearConfig {
        tax_year: "FY 2025-26".to_string(),
        cess_rate_percent: dec!(4),
        old: RegimeRules {
            standard_deduction: dec!(50000),
            brackets: BracketTable::new(vec![
                TaxBracket::new(dec!(0), Some(dec!(250000)), dec!(0)),
                TaxBracket::new(dec!(250000), Some(dec!(500000)), dec!(5)),
                TaxBracket::new(dec!(500000), Some(dec!(1000000)), dec!(20)),
                TaxBracket::new(dec!(1000000), None, dec!(30)),
            ]),
            rebate: RebateRule {
                income_threshold: dec!(500000),
                max_rebate: dec!(12500),
            },
        },
        new: RegimeRules {
            standard_deduction: dec!(75000),
            brackets: BracketTable::new(vec![
                TaxBracket::new(dec!(0), Some(dec!(400000)), dec!(0)),
                TaxBracket::new(dec!(400000), Some(dec!(800000)), dec!(5)),
                TaxBracket::new(dec!(800000), Some(dec!(1200000)), dec!(10)),
                TaxBracket::new(dec!(1200000), Some(dec!(1600000)), dec!(15)),
                TaxBracket::new(dec!(1600000), Some(dec!(2000000)), dec!(20)),
                TaxBracket::new(dec!(2000000), Some(dec!(2400000)), dec!(25)),
                TaxBracket::new(dec!(2400000), None, dec!(30)),
            ]),
            rebate: RebateRule {
                income_threshold: dec!(1200000),
                max_rebate: dec!(60000),
            },
        },
    }
}
