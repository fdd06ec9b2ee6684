//! Command implementations behind the `intax` binary.
//!
//! Each command returns the text to print so that the binary stays a thin
//! shell around argument parsing and tracing setup.

use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use intax_core::rules::default_rules;
use intax_core::{
    ComparisonResult, Regime, RegimeComparator, TaxCalculationResult, TaxEngine, TaxYearConfig,
    parse_income,
};
use intax_data::{BracketLoader, RuleSetLoader, RuleSettings};
use serde::Serialize;
use tracing::{debug, info};

use crate::csv_loader::{self, IncomeRow};
use crate::report;

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolves the active rule set: the built-in tables, or a TOML + CSV pair.
///
/// Supplying only one of the two files is an error.
pub fn load_rules(
    rules: Option<&Path>,
    brackets: Option<&Path>,
) -> Result<Cow<'static, TaxYearConfig>> {
    match (rules, brackets) {
        (None, None) => {
            debug!("using built-in rule set");
            Ok(Cow::Borrowed(default_rules()))
        }
        (Some(rules), Some(brackets)) => {
            let config = RuleSetLoader::load_files(rules, brackets)
                .context("Failed to load rule set")?;
            Ok(Cow::Owned(config))
        }
        _ => bail!("--rules and --brackets must be given together"),
    }
}

/// Computes one regime for an income given as text.
pub fn compute(
    config: &TaxYearConfig,
    income: &str,
    regime: Regime,
    format: OutputFormat,
) -> Result<String> {
    let income = parse_income(income).context("Invalid income")?;
    let result = TaxEngine::new(config).compute_tax(income, regime)?;
    render(&result, format, report::render_result)
}

/// Compares both regimes for an income given as text.
pub fn compare(
    config: &TaxYearConfig,
    income: &str,
    format: OutputFormat,
) -> Result<String> {
    let income = parse_income(income).context("Invalid income")?;
    let comparison = RegimeComparator::new(config).compare(income)?;
    render(&comparison, format, report::render_comparison)
}

/// Outcome of one batch row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum BatchOutcome {
    Single(TaxCalculationResult),
    Comparison(ComparisonResult),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub row: usize,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

/// Runs every row in file order.
///
/// Without `compare_all`, each row must name its regime.
pub fn batch_rows(
    config: &TaxYearConfig,
    rows: &[IncomeRow],
    compare_all: bool,
) -> Result<Vec<BatchEntry>> {
    let engine = TaxEngine::new(config);
    let comparator = RegimeComparator::new(config);

    rows.iter()
        .map(|row| -> Result<BatchEntry> {
            let outcome = match (compare_all, row.regime) {
                (true, _) => BatchOutcome::Comparison(comparator.compare(row.annual_gross_income)?),
                (false, Some(regime)) => {
                    BatchOutcome::Single(engine.compute_tax(row.annual_gross_income, regime)?)
                }
                (false, None) => {
                    bail!("row {} has no regime; add one or pass --compare", row.row)
                }
            };
            Ok(BatchEntry {
                row: row.row,
                outcome,
            })
        })
        .collect()
}

/// Loads a batch file and renders every row.
pub fn batch(
    config: &TaxYearConfig,
    path: &Path,
    compare_all: bool,
    format: OutputFormat,
) -> Result<String> {
    let rows = csv_loader::load_from_file(path)
        .with_context(|| format!("Failed to load batch file {}", path.display()))?;
    let entries = batch_rows(config, &rows, compare_all)?;
    info!(rows = entries.len(), "processed batch");

    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&entries).context("Failed to serialize batch results")
        }
        OutputFormat::Text => {
            let sections: Vec<String> = entries
                .iter()
                .map(|entry| {
                    let body = match &entry.outcome {
                        BatchOutcome::Single(result) => report::render_result(result),
                        BatchOutcome::Comparison(comparison) => {
                            report::render_comparison(comparison)
                        }
                    };
                    format!("# Row {}\n\n{}", entry.row, body)
                })
                .collect();
            Ok(sections.join("\n"))
        }
    }
}

/// Renders the active rule set and optionally exports it as a loadable
/// `rules.toml` + `brackets.csv` pair in `write_dir`.
pub fn rules(
    config: &TaxYearConfig,
    write_dir: Option<&Path>,
    format: OutputFormat,
) -> Result<String> {
    if let Some(dir) = write_dir {
        export_rules(config, dir)?;
    }
    render(config, format, report::render_rules)
}

fn export_rules(
    config: &TaxYearConfig,
    dir: &Path,
) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let settings_path = dir.join("rules.toml");
    let toml = RuleSettings::from_config(config).to_toml_string()?;
    std::fs::write(&settings_path, toml)
        .with_context(|| format!("Failed to write {}", settings_path.display()))?;

    let brackets_path = dir.join("brackets.csv");
    let file = File::create(&brackets_path)
        .with_context(|| format!("Failed to create {}", brackets_path.display()))?;
    BracketLoader::write(file, &BracketLoader::records_from_config(config))?;

    info!(dir = %dir.display(), "exported rule set");
    Ok(())
}

fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl Fn(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => serde_json::to_string_pretty(value).context("Failed to serialize output"),
    }
}

#[cfg(test)]
mod tests {
    use intax_core::InvalidInputError;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn row(
        row: usize,
        income: rust_decimal::Decimal,
        regime: Option<Regime>,
    ) -> IncomeRow {
        IncomeRow {
            row,
            annual_gross_income: income,
            regime,
        }
    }

    #[test]
    fn load_rules_defaults_to_built_in() {
        let config = load_rules(None, None).unwrap();

        assert!(matches!(config, Cow::Borrowed(_)));
        assert_eq!(config.tax_year, "FY 2025-26");
    }

    #[test]
    fn load_rules_requires_both_files() {
        let err = load_rules(Some(Path::new("rules.toml")), None).unwrap_err();

        assert!(err.to_string().contains("--rules and --brackets"));
    }

    #[test]
    fn compute_accepts_digit_separators() {
        let text = compute(default_rules(), "15,00,000", Regime::New, OutputFormat::Text).unwrap();

        assert!(text.contains("₹15,00,000"));
        assert!(text.contains("₹97,500"));
    }

    #[test]
    fn compute_json_round_trips() {
        let json = compute(default_rules(), "1000000", Regime::New, OutputFormat::Json).unwrap();

        let result: TaxCalculationResult = serde_json::from_str(&json).unwrap();

        assert_eq!(result.regime, Regime::New);
        assert_eq!(result.total_tax, dec!(0));
    }

    #[test]
    fn compute_forwards_zero_income() {
        let json = compute(default_rules(), "0", Regime::Old, OutputFormat::Json).unwrap();

        let result: TaxCalculationResult = serde_json::from_str(&json).unwrap();

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.effective_tax_rate_percent, dec!(0));
    }

    #[test]
    fn compute_surfaces_invalid_input() {
        let err = compute(default_rules(), "-5", Regime::Old, OutputFormat::Text).unwrap_err();

        assert_eq!(
            err.downcast_ref::<InvalidInputError>(),
            Some(&InvalidInputError::Negative(dec!(-5)))
        );
    }

    #[test]
    fn compute_rejects_income_above_maximum() {
        let err = compute(
            default_rules(),
            "79,228,162,514,264,337,593,543,950,335",
            Regime::New,
            OutputFormat::Text,
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InvalidInputError>(),
            Some(InvalidInputError::ExceedsMaximum(_))
        ));
    }

    #[test]
    fn compare_json_names_recommended_regime() {
        let json = compare(default_rules(), "1500000", OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["recommended"], "new");
    }

    #[test]
    fn batch_rows_keep_file_order() {
        let rows = vec![
            row(1, dec!(1000000), Some(Regime::New)),
            row(2, dec!(2000000), Some(Regime::Old)),
        ];

        let entries = batch_rows(default_rules(), &rows, false).unwrap();

        let numbers: Vec<_> = entries.iter().map(|e| e.row).collect();
        assert_eq!(numbers, vec![1, 2]);
        let BatchOutcome::Single(ref second) = entries[1].outcome else {
            panic!("expected single result");
        };
        assert_eq!(second.regime, Regime::Old);
    }

    #[test]
    fn batch_rows_without_regime_need_compare() {
        let rows = vec![row(1, dec!(1000000), Some(Regime::New)), row(2, dec!(500000), None)];

        let err = batch_rows(default_rules(), &rows, false).unwrap_err();

        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn batch_rows_compare_ignores_row_regime() {
        let rows = vec![row(1, dec!(1500000), Some(Regime::Old)), row(2, dec!(0), None)];

        let entries = batch_rows(default_rules(), &rows, true).unwrap();

        assert!(
            entries
                .iter()
                .all(|e| matches!(e.outcome, BatchOutcome::Comparison(_)))
        );
    }

    #[test]
    fn batch_entry_json_shape() {
        let rows = vec![row(3, dec!(1000000), Some(Regime::New))];
        let entries = batch_rows(default_rules(), &rows, false).unwrap();

        let value = serde_json::to_value(&entries).unwrap();

        assert_eq!(value[0]["row"], 3);
        assert_eq!(value[0]["kind"], "single");
        assert_eq!(value[0]["result"]["regime"], "new");
    }

    #[test]
    fn rules_text_lists_tax_year() {
        let text = rules(default_rules(), None, OutputFormat::Text).unwrap();

        assert!(text.starts_with("FY 2025-26"));
    }
}
