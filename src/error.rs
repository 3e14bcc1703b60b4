//! Error types for the fallible edges of the calculator
//!
//! The discount engine itself never fails. Errors only arise when raw user
//! input, tier table files or config files are turned into typed values.

use thiserror::Error;

/// Rejected user input at the selection boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Custom amount did not parse as an integer greater than zero
    #[error("custom amount must be a whole number greater than zero, got {0:?}")]
    InvalidCustomAmount(String),

    /// Custom amount is a positive integer but does not fit in an amount
    #[error("custom amount {0} is too large")]
    CustomAmountTooLarge(String),

    /// Custom amounts are switched off in the engine config
    #[error("custom amounts are not enabled")]
    CustomAmountsDisabled,

    /// Health level name not in the known set
    #[error("unknown health level: {0}")]
    UnknownHealthLevel(String),
}

/// Failure loading or validating an insurance tier table
#[derive(Debug, Error)]
pub enum TierTableError {
    #[error("failed to read tier table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tier table CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: cannot parse {value:?} as a percentage")]
    InvalidValue { row: String, value: String },

    #[error("header column {column}: expected {expected:?}, found {found:?}")]
    UnexpectedHeader {
        column: usize,
        expected: String,
        found: String,
    },

    #[error("unknown tier table row: {0}")]
    UnknownRow(String),

    #[error("tier table is missing the {0} row")]
    MissingRow(&'static str),

    #[error("row {row} has {found} values, expected {expected}")]
    WrongWidth {
        row: String,
        found: usize,
        expected: usize,
    },

    #[error("row {row}, tier {tier}: percentage {value} outside 0-100")]
    OutOfRange { row: String, tier: u32, value: f64 },

    #[error("tier {tier}: base rate {base_pct}% differs from ohboy rate {ohboy_pct}%")]
    BaseMismatch { tier: u32, base_pct: f64, ohboy_pct: f64 },

    #[error("tier {tier}: {higher} ({higher_pct}%) pays less than {lower} ({lower_pct}%)")]
    NotMonotonic {
        tier: u32,
        lower: &'static str,
        lower_pct: f64,
        higher: &'static str,
        higher_pct: f64,
    },
}

/// Failure loading an engine config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read engine config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid engine config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
