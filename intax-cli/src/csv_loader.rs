//! CSV loader for batch income files.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column       | Required | Type    | Notes                                         |
//! |--------------|----------|---------|-----------------------------------------------|
//! | `annual_ctc` | yes      | decimal | Digit separators allowed when quoted: `"15,00,000"` |
//! | `regime`     | no       | string  | `old` or `new`; leave empty when comparing     |
//!
//! ### Example
//!
//! ```csv
//! annual_ctc,regime
//! 1000000,new
//! "20,00,000",old
//! 1500000,
//! ```
use std::path::Path;

use intax_core::{InvalidInputError, Regime, parse_income};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    annual_ctc: String,
    regime: Option<String>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One validated row of a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeRow {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub annual_gross_income: Decimal,
    pub regime: Option<Regime>,
}

/// Errors that can occur while loading a batch file.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// Bad structure, missing required column, etc.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("invalid income on row {row}: {source}")]
    InvalidIncome {
        row: usize,
        #[source]
        source: InvalidInputError,
    },

    #[error("unrecognised regime '{value}' on row {row}")]
    InvalidRegime { value: String, row: usize },

    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<IncomeRow, CsvLoadError> {
    let annual_gross_income =
        parse_income(&row.annual_ctc).map_err(|source| CsvLoadError::InvalidIncome {
            row: row_number,
            source,
        })?;

    let regime = match row.regime.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(code) => Some(Regime::parse(code).ok_or_else(|| CsvLoadError::InvalidRegime {
            value: code.to_string(),
            row: row_number,
        })?),
    };

    if annual_gross_income.is_zero() {
        warn!(row = row_number, "batch row has zero income");
    }

    Ok(IncomeRow {
        row: row_number,
        annual_gross_income,
        regime,
    })
}

/// Parse CSV text and return the rows in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] if the CSV is structurally invalid.
/// * [CsvLoadError::InvalidIncome] if an amount is not a non-negative number.
/// * [CsvLoadError::InvalidRegime] if a regime cell is not `old` or `new`.
pub fn load_from_str(input: &str) -> Result<Vec<IncomeRow>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<IncomeRow>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CsvLoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
