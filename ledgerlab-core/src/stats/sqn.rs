//! System Quality Number and the statistical confidence of a trade sample.
//!
//! Both work on per-trade returns, so a strategy that compounds the same
//! percentage gain every time is rated as perfectly flat, not as a run of
//! ever-larger wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::significance::mean_edge;
use super::{mean_f64, std_dev, EPSILON};

/// Trades required before `confidence_level` reports anything.
pub const MIN_TRADES_FOR_CONFIDENCE: usize = 30;

/// SQN = sqrt(N) · mean(return) / std(return).
///
/// Returns 0.0 for fewer than two trades or zero variance.
pub fn sqn(trade_returns: &[f64]) -> f64 {
    if trade_returns.len() < 2 {
        return 0.0;
    }
    let std = std_dev(trade_returns);
    if std < EPSILON {
        return 0.0;
    }
    (trade_returns.len() as f64).sqrt() * mean_f64(trade_returns) / std
}

/// Confidence, in percent, that the mean trade return is positive.
///
/// `(1 - p) · 100` from a one-sided t test. Returns 0.0 below
/// `MIN_TRADES_FOR_CONFIDENCE` trades or for a flat sample.
pub fn confidence_level(trade_returns: &[f64]) -> f64 {
    if trade_returns.len() < MIN_TRADES_FOR_CONFIDENCE {
        return 0.0;
    }
    mean_edge(trade_returns).map_or(0.0, |edge| ((1.0 - edge.p_value) * 100.0).clamp(0.0, 100.0))
}

/// Van Tharp's SQN ladder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqnRating {
    #[default]
    Poor,
    BelowAverage,
    Average,
    Good,
    Excellent,
    Superb,
    TooGoodToBeTrue,
}

impl SqnRating {
    pub fn from_sqn(sqn: f64) -> Self {
        match sqn {
            s if s < 1.6 => Self::Poor,
            s if s < 2.0 => Self::BelowAverage,
            s if s < 2.5 => Self::Average,
            s if s < 3.0 => Self::Good,
            s if s < 5.0 => Self::Excellent,
            s if s < 7.0 => Self::Superb,
            _ => Self::TooGoodToBeTrue,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::BelowAverage => "below average",
            Self::Average => "average",
            Self::Good => "good",
            Self::Excellent => "excellent",
            Self::Superb => "superb",
            Self::TooGoodToBeTrue => "too good to be true, likely curve-fitted",
        }
    }
}

impl fmt::Display for SqnRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
