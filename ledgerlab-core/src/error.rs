//! Error types for the ledger core.
//!
//! Only structurally invalid inputs produce errors. Numeric degeneracies
//! (empty ledgers, zero variance, zero losses) resolve to documented defaults
//! inside the statistics layer and never surface here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("candle field '{field}' is not finite: {value}")]
    NonFiniteField { field: &'static str, value: f64 },

    #[error("unparseable timestamp '{0}' (expected YYYY-MM-DD, YYYY-MM-DD HH:MM:SS or RFC 3339)")]
    InvalidTimestamp(String),

    #[error("starting balance must be a positive, finite amount, got {0}")]
    InvalidStartingBalance(f64),

    #[error("start date {start} is after end date {end}")]
    InvalidDateBounds {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("invalid compile option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },

    /// Internal inconsistency detected while compiling. Not reachable from a
    /// ledger built through `admit`.
    #[error("calculation error: {0}")]
    Calculation(String),
}
