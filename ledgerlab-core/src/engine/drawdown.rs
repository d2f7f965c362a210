//! Drawdown engine: peak-to-trough statistics over the trade equity curve.
//!
//! The curve is `[starting_balance, pair₁.balance_after, pair₂.balance_after, …]`.
//! Drawdown samples are percentages of the running peak and are never
//! positive: `0.0` at or above the peak, negative below it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::TradePair;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawdownStats {
    /// Most negative sample, in percent (≤ 0).
    pub max_percentage: f64,
    /// Mean of the non-zero samples, in percent (≤ 0).
    pub average_percentage: f64,
    /// Longest peak-to-recovery span in calendar days.
    pub max_duration_days: i64,
}

impl DrawdownStats {
    /// Size of the worst drawdown as a positive percentage.
    pub fn max_magnitude(&self) -> f64 {
        self.max_percentage.abs()
    }
}

/// Balance after each trade, preceded by the starting balance.
pub fn equity_curve(trade_pairs_chronological: &[TradePair], starting_balance: f64) -> Vec<f64> {
    std::iter::once(starting_balance)
        .chain(trade_pairs_chronological.iter().map(|p| p.balance_after))
        .collect()
}

/// Drawdown in percent at every point of the curve.
pub fn drawdown_samples(curve: &[f64]) -> Vec<f64> {
    let Some(&first) = curve.first() else {
        return Vec::new();
    };
    let mut peak = first;
    curve
        .iter()
        .map(|&equity| {
            if equity >= peak {
                peak = equity;
                return 0.0;
            }
            if peak <= 0.0 {
                return 0.0;
            }
            -(peak - equity) / peak * 100.0
        })
        .collect()
}

/// Compute drawdown statistics for a compiled trade list.
///
/// Point 0 is dated `start_date`, falling back to the first entry's date;
/// every later point is dated by its pair's exit.
pub fn compute(
    trade_pairs_chronological: &[TradePair],
    starting_balance: f64,
    start_date: Option<NaiveDate>,
) -> DrawdownStats {
    let curve = equity_curve(trade_pairs_chronological, starting_balance);
    if curve.len() < 2 {
        return DrawdownStats::default();
    }

    let samples = drawdown_samples(&curve);
    let max_percentage = samples.iter().copied().fold(0.0_f64, f64::min);

    let underwater: Vec<f64> = samples.iter().copied().filter(|&s| s < 0.0).collect();
    let average_percentage = if underwater.is_empty() {
        0.0
    } else {
        underwater.iter().sum::<f64>() / underwater.len() as f64
    };

    let first_date = start_date.or_else(|| trade_pairs_chronological.first().and_then(|p| p.entry_date()));
    let dates: Vec<Option<NaiveDate>> = std::iter::once(first_date)
        .chain(trade_pairs_chronological.iter().map(|p| p.exit_date()))
        .collect();

    DrawdownStats {
        max_percentage,
        average_percentage,
        max_duration_days: max_duration_days(&curve, &dates),
    }
}

/// Longest span from a peak to the first point that reaches it again, or to
/// the last point when equity never recovers.
fn max_duration_days(curve: &[f64], dates: &[Option<NaiveDate>]) -> i64 {
    let mut peak = curve[0];
    let mut peak_date = dates[0];
    let mut underwater = false;
    let mut longest = 0_i64;

    for (&equity, &date) in curve.iter().zip(dates).skip(1) {
        if equity >= peak {
            if underwater {
                longest = longest.max(span_days(peak_date, date));
                underwater = false;
            }
            peak = equity;
            peak_date = date;
        } else {
            underwater = true;
        }
    }

    if underwater {
        let last = dates.last().copied().flatten();
        longest = longest.max(span_days(peak_date, last));
    }
    longest
}

fn span_days(from: Option<NaiveDate>, to: Option<NaiveDate>) -> i64 {
    match (from, to) {
        (Some(from), Some(to)) => (to - from).num_days().max(0),
        _ => 0,
    }
}
