//! Scalar rule-set settings stored as TOML.
//!
//! ```toml
//! tax_year = "FY 2025-26"
//! cess_rate_percent = 4
//!
//! [old]
//! standard_deduction = 50000
//! rebate_threshold = 500000
//! max_rebate = 12500
//!
//! [new]
//! standard_deduction = 75000
//! rebate_threshold = 1200000
//! max_rebate = 60000
//! ```
//!
//! Bracket tables live in a separate CSV file read by
//! [`BracketLoader`](crate::BracketLoader).

use std::path::Path;

use intax_core::{BracketTable, RebateRule, Regime, RegimeRules, RuleSetError, TaxYearConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::loader::{BracketLoader, BracketLoaderError, RegimeBrackets};

/// Errors that can occur while assembling a rule set from files.
#[derive(Debug, Error)]
pub enum RuleSetLoaderError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML write error: {0}")]
    TomlWrite(String),

    #[error(transparent)]
    Brackets(#[from] BracketLoaderError),

    #[error("invalid rule set: {0}")]
    Invalid(#[from] RuleSetError),
}

/// Per-regime scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeSettings {
    pub standard_deduction: Decimal,
    pub rebate_threshold: Decimal,
    pub max_rebate: Decimal,
}

/// Everything in a rule set except the bracket tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSettings {
    pub tax_year: String,
    pub cess_rate_percent: Decimal,
    pub old: RegimeSettings,
    pub new: RegimeSettings,
}

impl RuleSettings {
    /// Extracts the scalar settings of an existing rule set.
    pub fn from_config(config: &TaxYearConfig) -> Self {
        let regime = |rules: &RegimeRules| RegimeSettings {
            standard_deduction: rules.standard_deduction,
            rebate_threshold: rules.rebate.income_threshold,
            max_rebate: rules.rebate.max_rebate,
        };
        Self {
            tax_year: config.tax_year.clone(),
            cess_rate_percent: config.cess_rate_percent,
            old: regime(&config.old),
            new: regime(&config.new),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, RuleSetLoaderError> {
        toml::to_string(self).map_err(|e| RuleSetLoaderError::TomlWrite(e.to_string()))
    }

    fn regime(
        &self,
        regime: Regime,
    ) -> &RegimeSettings {
        match regime {
            Regime::Old => &self.old,
            Regime::New => &self.new,
        }
    }
}

/// Builds a validated [`TaxYearConfig`] from TOML settings plus a bracket CSV.
pub struct RuleSetLoader;

impl RuleSetLoader {
    pub fn parse_settings(input: &str) -> Result<RuleSettings, RuleSetLoaderError> {
        toml::from_str(input).map_err(|e| RuleSetLoaderError::TomlParse(e.to_string()))
    }

    /// Combines settings and brackets, then validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetLoaderError::Invalid`] if the combined rule set
    /// breaks any bracket, deduction, rebate or cess constraint.
    pub fn build(
        settings: &RuleSettings,
        brackets: RegimeBrackets,
    ) -> Result<TaxYearConfig, RuleSetLoaderError> {
        let rules = |regime: Regime, table: BracketTable| {
            let s = settings.regime(regime);
            RegimeRules {
                standard_deduction: s.standard_deduction,
                brackets: table,
                rebate: RebateRule {
                    income_threshold: s.rebate_threshold,
                    max_rebate: s.max_rebate,
                },
            }
        };

        let config = TaxYearConfig {
            tax_year: settings.tax_year.clone(),
            cess_rate_percent: settings.cess_rate_percent,
            old: rules(Regime::Old, brackets.old),
            new: rules(Regime::New, brackets.new),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads the settings TOML and bracket CSV from disk.
    pub fn load_files(
        settings_path: &Path,
        brackets_path: &Path,
    ) -> Result<TaxYearConfig, RuleSetLoaderError> {
        let settings_text =
            std::fs::read_to_string(settings_path).map_err(|e| io_error(settings_path, e))?;
        let settings = Self::parse_settings(&settings_text)?;

        let brackets_file =
            std::fs::File::open(brackets_path).map_err(|e| io_error(brackets_path, e))?;
        let records = BracketLoader::parse(brackets_file)?;
        let brackets = BracketLoader::group(&records)?;

        let config = Self::build(&settings, brackets)?;
        info!(
            tax_year = %config.tax_year,
            settings = %settings_path.display(),
            brackets = %brackets_path.display(),
            "loaded rule set"
        );
        Ok(config)
    }
}

fn io_error(
    path: &Path,
    err: std::io::Error,
) -> RuleSetLoaderError {
    RuleSetLoaderError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
