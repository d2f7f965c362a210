//! Per-trade statistics: win rate, best/worst trade, gross figures,
//! profit factor and expectancy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::TradePair;

/// Gross profit over gross loss.
///
/// `Infinite` is a real outcome (winners, no losers), not an error. Callers
/// that need a plain number must pick a value for it via `as_f64` or
/// `capped`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProfitFactor {
    Finite(f64),
    Infinite,
}

impl ProfitFactor {
    pub fn is_infinite(&self) -> bool {
        matches!(self, ProfitFactor::Infinite)
    }

    /// IEEE value; `Infinite` maps to `f64::INFINITY`.
    pub fn as_f64(&self) -> f64 {
        match self {
            ProfitFactor::Finite(v) => *v,
            ProfitFactor::Infinite => f64::INFINITY,
        }
    }

    /// Value clamped to `cap`, for ranking contexts that need finite numbers.
    pub fn capped(&self, cap: f64) -> f64 {
        self.as_f64().min(cap)
    }
}

impl Default for ProfitFactor {
    fn default() -> Self {
        ProfitFactor::Finite(0.0)
    }
}

impl fmt::Display for ProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitFactor::Finite(v) => write!(f, "{v:.2}"),
            ProfitFactor::Infinite => write!(f, "inf"),
        }
    }
}

/// Percentage of trades with strictly positive P&L.
pub fn win_rate(trades: &[TradePair]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64 * 100.0
}

pub fn winning_trades(trades: &[TradePair]) -> usize {
    trades.iter().filter(|t| t.is_winner()).count()
}

pub fn losing_trades(trades: &[TradePair]) -> usize {
    trades.iter().filter(|t| t.is_loser()).count()
}

/// Highest per-trade return in percent of the opening balance.
pub fn best_trade_pct(trades: &[TradePair]) -> f64 {
    trades
        .iter()
        .map(TradePair::return_pct)
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Lowest per-trade return in percent of the opening balance.
pub fn worst_trade_pct(trades: &[TradePair]) -> f64 {
    trades
        .iter()
        .map(TradePair::return_pct)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

pub fn total_pnl(trades: &[TradePair]) -> f64 {
    trades.iter().map(TradePair::pnl).sum()
}

/// Sum of winning P&L (≥ 0).
pub fn gross_profit(trades: &[TradePair]) -> f64 {
    trades.iter().map(TradePair::pnl).filter(|&p| p > 0.0).sum()
}

/// Sum of losing P&L (≤ 0).
pub fn gross_loss(trades: &[TradePair]) -> f64 {
    trades.iter().map(TradePair::pnl).filter(|&p| p < 0.0).sum()
}

pub fn average_winning_trade(trades: &[TradePair]) -> f64 {
    let winners = winning_trades(trades);
    if winners == 0 {
        return 0.0;
    }
    gross_profit(trades) / winners as f64
}

/// Mean losing P&L (≤ 0).
pub fn average_losing_trade(trades: &[TradePair]) -> f64 {
    let losers = losing_trades(trades);
    if losers == 0 {
        return 0.0;
    }
    gross_loss(trades) / losers as f64
}

pub fn largest_winning_trade(trades: &[TradePair]) -> f64 {
    trades
        .iter()
        .map(TradePair::pnl)
        .filter(|&p| p > 0.0)
        .reduce(f64::max)
        .unwrap_or(0.0)
}

pub fn largest_losing_trade(trades: &[TradePair]) -> f64 {
    trades
        .iter()
        .map(TradePair::pnl)
        .filter(|&p| p < 0.0)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

/// Profit factor: gross profit / |gross loss|.
pub fn profit_factor(trades: &[TradePair]) -> ProfitFactor {
    let profit = gross_profit(trades);
    let loss = gross_loss(trades).abs();
    if loss == 0.0 {
        return if profit > 0.0 {
            ProfitFactor::Infinite
        } else {
            ProfitFactor::Finite(0.0)
        };
    }
    ProfitFactor::Finite(profit / loss)
}

/// Average P&L per closed trade.
pub fn expectancy(total_pnl: f64, trades_count: usize) -> f64 {
    if trades_count == 0 {
        return 0.0;
    }
    total_pnl / trades_count as f64
}

/// Expectancy in percent of the starting balance.
pub fn expectancy_pct(total_pnl: f64, trades_count: usize, starting_balance: f64) -> f64 {
    if starting_balance == 0.0 {
        return 0.0;
    }
    expectancy(total_pnl, trades_count) / starting_balance * 100.0
}
