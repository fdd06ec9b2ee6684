use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Regime;

/// The only way a tax computation can fail: the gross income handed in is
/// not a finite, non-negative amount no larger than
/// [`MAX_INCOME`](crate::calculations::input::MAX_INCOME).
///
/// Raised before any arithmetic starts, so no partial result ever exists.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidInputError {
    /// Gross income below zero.
    #[error("annual gross income must be non-negative, got {0}")]
    Negative(Decimal),

    /// NaN or an infinity supplied through a floating-point entry point.
    #[error("annual gross income must be a finite number, got {0}")]
    NotFinite(f64),

    /// Text that does not parse as a decimal amount.
    #[error("annual gross income is not a number: '{0}'")]
    NotNumeric(String),

    /// A finite float too large to represent as a decimal amount.
    #[error("annual gross income {0} is out of range")]
    OutOfRange(f64),

    /// Above the largest amount the bracket arithmetic is defined for.
    #[error("annual gross income {0} exceeds the supported maximum")]
    ExceedsMaximum(Decimal),
}

/// Problems found when validating a rule set for a tax year.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("{0} regime has no tax brackets")]
    EmptyBracketTable(Regime),

    #[error("{regime} regime: first bracket must start at 0, starts at {min}")]
    FirstBracketNotZero { regime: Regime, min: Decimal },

    #[error("{regime} regime: bracket {index} starts at {found}, expected {expected}")]
    NotContiguous {
        regime: Regime,
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("{regime} regime: bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd { regime: Regime, index: usize },

    #[error("{0} regime: last bracket must be unbounded")]
    BoundedLastBracket(Regime),

    #[error("{regime} regime: bracket {index} has an upper bound not above its lower bound")]
    EmptyBracket { regime: Regime, index: usize },

    #[error("{regime} regime: bracket {index} rate must be between 0 and 100, got {rate}")]
    InvalidRate {
        regime: Regime,
        index: usize,
        rate: Decimal,
    },

    #[error("{regime} regime: bracket {index} rate {rate} is lower than the previous bracket")]
    DecreasingRate {
        regime: Regime,
        index: usize,
        rate: Decimal,
    },

    #[error("{regime} regime: standard deduction must be non-negative, got {amount}")]
    NegativeDeduction { regime: Regime, amount: Decimal },

    #[error("{regime} regime: rebate threshold and maximum must be non-negative")]
    NegativeRebate { regime: Regime },

    #[error("cess rate must be between 0 and 100, got {0}")]
    InvalidCessRate(Decimal),
}
