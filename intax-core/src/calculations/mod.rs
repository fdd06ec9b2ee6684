//! Tax computation for Indian income-tax regimes.
//!
//! [`TaxEngine`] computes a single regime; [`RegimeComparator`] runs both and
//! recommends the cheaper one. Both borrow an immutable
//! [`TaxYearConfig`](crate::models::TaxYearConfig).

pub mod common;
pub mod comparator;
pub mod engine;
mod explanation;
pub mod format;
pub mod input;

pub use comparator::RegimeComparator;
pub use engine::{TaxEngine, bracket_label};
pub use input::{MAX_INCOME, income_from_f64, parse_income, validate_income};
