use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two mutually exclusive rule sets a taxpayer can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    New,
}

/// Returned when a regime code is neither `old` nor `new`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown tax regime '{0}' (expected 'old' or 'new')")]
pub struct UnknownRegime(pub String);

impl Regime {
    /// Both regimes, in the order they are reported side by side.
    pub const ALL: [Regime; 2] = [Regime::Old, Regime::New];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    /// Case-insensitive; surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Some(Self::Old),
            "new" => Some(Self::New),
            _ => None,
        }
    }

    /// Capitalised name used in explanations ("Old", "New").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Old => "Old",
            Self::New => "New",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Regime {
    type Err = UnknownRegime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRegime(s.to_string()))
    }
}
