use std::io::{Read, Write};

use intax_core::{BracketTable, Regime, TaxBracket, TaxYearConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when reading or writing bracket data.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("CSV write error: {0}")]
    CsvWrite(String),

    #[error("Invalid regime '{value}' on row {row} (expected 'old' or 'new')")]
    InvalidRegime { value: String, row: usize },
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a bracket CSV file.
///
/// - `regime`: `old` or `new`
/// - `min_income`: lower bound of the slab
/// - `max_income`: upper bound (empty for the open-ended top slab)
/// - `rate`: marginal rate as a percentage (e.g. `5` for 5%)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BracketRecord {
    pub regime: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Bracket tables for both regimes, as read from one CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegimeBrackets {
    pub old: BracketTable,
    pub new: BracketTable,
}

/// Reads and writes bracket tables in CSV form.
///
/// One file carries both regimes; rows may appear in any order and are
/// sorted by `min_income` when grouped.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        debug!(records = records.len(), "parsed bracket records");
        Ok(records)
    }

    /// Split records into per-regime tables, each sorted by lower bound.
    ///
    /// A regime with no rows yields an empty table, which rule-set
    /// validation reports.
    pub fn group(records: &[BracketRecord]) -> Result<RegimeBrackets, BracketLoaderError> {
        let mut old = Vec::new();
        let mut new = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let regime = Regime::parse(&record.regime).ok_or_else(|| {
                BracketLoaderError::InvalidRegime {
                    value: record.regime.clone(),
                    row: idx + 1,
                }
            })?;

            let bracket = TaxBracket::new(record.min_income, record.max_income, record.rate);
            match regime {
                Regime::Old => old.push(bracket),
                Regime::New => new.push(bracket),
            }
        }

        old.sort_by(|a, b| a.min_income.cmp(&b.min_income));
        new.sort_by(|a, b| a.min_income.cmp(&b.min_income));

        Ok(RegimeBrackets {
            old: BracketTable::new(old),
            new: BracketTable::new(new),
        })
    }

    /// Flatten a rule set back into records, old regime first.
    pub fn records_from_config(config: &TaxYearConfig) -> Vec<BracketRecord> {
        Regime::ALL
            .iter()
            .flat_map(|&regime| {
                config.rules(regime).brackets.iter().map(move |b| BracketRecord {
                    regime: regime.as_str().to_string(),
                    min_income: b.min_income,
                    max_income: b.max_income,
                    rate: b.rate_percent,
                })
            })
            .collect()
    }

    /// Write records as CSV with a header row.
    pub fn write<W: Write>(
        writer: W,
        records: &[BracketRecord],
    ) -> Result<(), BracketLoaderError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in records {
            csv_writer
                .serialize(record)
                .map_err(|e| BracketLoaderError::CsvWrite(e.to_string()))?;
        }
        csv_writer
            .flush()
            .map_err(|e| BracketLoaderError::CsvWrite(e.to_string()))
    }
}
