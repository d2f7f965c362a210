//! Return-based ratios: Sharpe, Sortino, Calmar, total return, CAGR and
//! annualized volatility.
//!
//! Sharpe and Sortino are per-trade ratios (not annualized): the sample is
//! the list of per-trade fractional returns against the opening balance.

use super::{mean_f64, saturate, std_dev, EPSILON};
use crate::domain::TradePair;

/// Days per year used to annualize calendar durations.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Per-trade fractional returns, oldest first.
pub fn trade_returns(trades: &[TradePair]) -> Vec<f64> {
    trades.iter().map(TradePair::return_fraction).collect()
}

/// Per-trade returns in percent, oldest first.
pub fn trade_returns_pct(trades: &[TradePair]) -> Vec<f64> {
    trades.iter().map(TradePair::return_pct).collect()
}

/// (mean return - risk-free rate) / sample standard deviation.
///
/// Returns 0.0 for fewer than two returns or a flat series.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let std = std_dev(returns);
    if std < EPSILON {
        return 0.0;
    }
    (mean_f64(returns) - risk_free_rate) / std
}

/// (mean return - risk-free rate) / downside deviation.
///
/// Downside deviation is `sqrt(Σ min(r - rf, 0)² / n)`. Returns 0.0 when no
/// return falls below the risk-free rate.
pub fn sortino_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    let downside = downside_deviation(returns, risk_free_rate);
    if downside < EPSILON {
        return 0.0;
    }
    (mean_f64(returns) - risk_free_rate) / downside
}

pub fn downside_deviation(returns: &[f64], target: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = returns
        .iter()
        .map(|r| (r - target).min(0.0).powi(2))
        .sum();
    (sum_sq / returns.len() as f64).sqrt()
}

/// Annualized return / |max drawdown|, both in percent.
///
/// Returns 0.0 when there was no drawdown. Saturates like `cagr_pct`.
pub fn calmar_ratio(annual_return_pct: f64, max_drawdown_pct: f64) -> f64 {
    if max_drawdown_pct == 0.0 {
        return 0.0;
    }
    saturate(annual_return_pct / max_drawdown_pct.abs())
}

/// Total return in percent of the starting balance.
pub fn total_return_pct(starting_balance: f64, final_balance: f64) -> f64 {
    if starting_balance == 0.0 {
        return 0.0;
    }
    (final_balance - starting_balance) / starting_balance * 100.0
}

/// Compound annual growth rate in percent.
///
/// Projects the total return over `duration_days` onto a 365.25-day year.
/// Returns 0.0 when the duration is unknown/zero or the starting balance is
/// zero, and -100.0 once the account is wiped out. Compounding is done in log
/// space; a short, steep run whose annualized figure exceeds `f64` saturates
/// at `f64::MAX`.
pub fn cagr_pct(starting_balance: f64, final_balance: f64, duration_days: i64) -> f64 {
    if duration_days <= 0 || starting_balance == 0.0 {
        return 0.0;
    }
    let growth = final_balance / starting_balance;
    if growth <= 0.0 {
        return -100.0;
    }
    let years = duration_days as f64 / DAYS_PER_YEAR;
    saturate((growth.ln() / years).exp_m1() * 100.0)
}

/// Sample standard deviation of per-trade percent returns, scaled by
/// `sqrt(periods_per_year)`. Returns 0.0 for fewer than two trades.
pub fn annual_volatility_pct(returns_pct: &[f64], periods_per_year: f64) -> f64 {
    if returns_pct.len() < 2 || periods_per_year <= 0.0 {
        return 0.0;
    }
    std_dev(returns_pct) * periods_per_year.sqrt()
}
