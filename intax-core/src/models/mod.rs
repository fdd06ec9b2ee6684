mod rebate_rule;
mod regime;
mod tax_bracket;
mod tax_result;
mod tax_year_config;

pub use rebate_rule::RebateRule;
pub use regime::{Regime, UnknownRegime};
pub use tax_bracket::{BracketTable, TaxBracket};
pub use tax_result::{BracketBreakdown, ComparisonResult, TaxCalculationInput, TaxCalculationResult};
pub use tax_year_config::{RegimeRules, TaxYearConfig};
