//! CAPM-style market risk: alpha, beta, correlation, tracking error and
//! information ratio.
//!
//! No benchmark feed is required. Without one, the strategy's own per-trade
//! returns stand in for the market, which pins beta and correlation at 1 and
//! alpha, tracking error and information ratio at 0 whenever the strategy
//! has any variance. Passing a benchmark series (aligned per trade) switches
//! to the real formulas.

use serde::{Deserialize, Serialize};

use super::{mean_f64, std_dev, EPSILON};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketRisk {
    /// Annualized excess return over the CAPM expectation, in percent.
    pub alpha: f64,
    pub beta: f64,
    pub correlation: f64,
    /// Annualized standard deviation of active returns, in percent.
    pub tracking_error: f64,
    /// Annualized mean active return over its deviation.
    pub information_ratio: f64,
}

/// Compute market risk for per-trade fractional returns.
///
/// `benchmark` is truncated or ignored past the strategy length; fewer than
/// two aligned observations yield all zeros.
pub fn market_risk(
    strategy: &[f64],
    benchmark: Option<&[f64]>,
    risk_free_rate: f64,
    periods_per_year: f64,
) -> MarketRisk {
    let benchmark = benchmark.unwrap_or(strategy);
    let n = strategy.len().min(benchmark.len());
    if n < 2 || periods_per_year <= 0.0 {
        return MarketRisk::default();
    }
    let s = &strategy[..n];
    let b = &benchmark[..n];

    let std_s = std_dev(s);
    let std_b = std_dev(b);
    if std_s < EPSILON && std_b < EPSILON {
        return MarketRisk::default();
    }

    let cov = covariance(s, b);
    let beta = if std_b < EPSILON { 0.0 } else { cov / (std_b * std_b) };
    let correlation = if std_s < EPSILON || std_b < EPSILON {
        0.0
    } else {
        (cov / (std_s * std_b)).clamp(-1.0, 1.0)
    };

    let mean_s = mean_f64(s);
    let mean_b = mean_f64(b);
    let expected = risk_free_rate + beta * (mean_b - risk_free_rate);
    let alpha = (mean_s - expected) * periods_per_year * 100.0;

    let active: Vec<f64> = s.iter().zip(b).map(|(x, y)| x - y).collect();
    let active_std = std_dev(&active);
    let (tracking_error, information_ratio) = if active_std < EPSILON {
        (0.0, 0.0)
    } else {
        (
            active_std * periods_per_year.sqrt() * 100.0,
            mean_f64(&active) / active_std * periods_per_year.sqrt(),
        )
    };

    MarketRisk {
        alpha: clean(alpha),
        beta,
        correlation,
        tracking_error,
        information_ratio,
    }
}

/// Sample covariance (n - 1).
fn covariance(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return 0.0;
    }
    let mean_a = mean_f64(&a[..n]);
    let mean_b = mean_f64(&b[..n]);
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum::<f64>()
        / (n - 1) as f64
}

/// Snap rounding noise around zero to exactly zero.
fn clean(value: f64) -> f64 {
    if value.abs() < 1e-9 {
        0.0
    } else {
        value
    }
}
