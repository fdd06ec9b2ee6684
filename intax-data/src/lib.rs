//! Loading Indian income-tax rule sets from data files.
//!
//! A rule set is split across two files: a TOML document with the scalar
//! settings (cess, deductions, rebates) and a CSV file with the bracket
//! tables for both regimes.

mod loader;
mod settings;

pub use loader::{BracketLoader, BracketLoaderError, BracketRecord, RegimeBrackets};
pub use settings::{RegimeSettings, RuleSetLoader, RuleSetLoaderError, RuleSettings};
