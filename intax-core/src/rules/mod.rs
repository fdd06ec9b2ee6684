//! Built-in rule sets.
//!
//! Each tax year is plain data; the engine only ever sees a
//! [`TaxYearConfig`](crate::models::TaxYearConfig), so a new year is added by
//! writing another table here (or by loading one from files).

mod fy2025_26;

pub use fy2025_26::fy2025_26;

use crate::models::TaxYearConfig;

/// Rule set used when the caller does not supply one.
pub fn default_rules() -> &'static TaxYearConfig {
    fy2025_26()
}
