//! Trade and return metrics: pure functions over a compiled trade list.
//!
//! Every metric is a pure function: trade pairs and/or scalars in, scalar out.
//! Degenerate inputs (no trades, one trade, zero variance, zero losses)
//! resolve to documented defaults instead of NaN, infinity or an error.

pub mod kelly;
pub mod market;
pub mod returns;
pub mod significance;
pub mod sqn;
pub mod trades;

pub use kelly::KellyRating;
pub use market::MarketRisk;
pub use sqn::SqnRating;
pub use trades::ProfitFactor;

// ─── Helpers ────────────────────────────────────────────────────────

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1). Zero for fewer than two values.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Deviations below this are treated as zero.
pub(crate) const EPSILON: f64 = 1e-15;

/// Clamp an overflowed result to `±f64::MAX`; NaN becomes 0.0.
pub(crate) fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-f64::MAX, f64::MAX)
    }
}
