//! Old-vs-new regime comparison.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::engine::TaxEngine;
use crate::calculations::format::rupees;
use crate::error::InvalidInputError;
use crate::models::{ComparisonResult, Regime, TaxYearConfig};

/// Runs the engine under both regimes for the same income.
#[derive(Debug, Clone, Copy)]
pub struct RegimeComparator<'a> {
    engine: TaxEngine<'a>,
}

impl<'a> RegimeComparator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self {
            engine: TaxEngine::new(config),
        }
    }

    /// # Errors
    ///
    /// Same as [`TaxEngine::compute_tax`]; validation happens before either
    /// regime is computed.
    pub fn compare(
        &self,
        annual_gross_income: Decimal,
    ) -> Result<ComparisonResult, InvalidInputError> {
        let old = self.engine.compute_tax(annual_gross_income, Regime::Old)?;
        let new = self.engine.compute_tax(annual_gross_income, Regime::New)?;

        let savings = old.total_tax - new.total_tax;
        let recommended = match savings.cmp(&Decimal::ZERO) {
            Ordering::Greater => Some(Regime::New),
            Ordering::Less => Some(Regime::Old),
            Ordering::Equal => None,
        };
        let recommendation = recommendation_text(recommended, savings);

        debug!(%annual_gross_income, %savings, ?recommended, "compared regimes");

        Ok(ComparisonResult {
            old,
            new,
            savings,
            recommended,
            recommendation,
        })
    }
}

fn recommendation_text(
    recommended: Option<Regime>,
    savings: Decimal,
) -> String {
    match recommended {
        Some(regime) => format!(
            "The {} Tax Regime saves you {} annually.",
            regime.label(),
            rupees(savings.abs())
        ),
        None => "Both regimes result in the same tax liability.".to_string(),
    }
}
