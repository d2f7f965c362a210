//! Report: the immutable result of compiling a ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::compile::CompileOptions;
use super::Ledger;
use crate::domain::{Event, TradePair};
use crate::error::LedgerError;
use crate::stats::{KellyRating, ProfitFactor, SqnRating};

/// Every statistic derived from a compiled ledger.
///
/// Percent-valued fields are in percent (`12.5` = 12.5 %). Drawdown fields
/// are non-positive. With zero trades everything is `0.0` except the
/// risk of ruin, which is `1.0` (no observed edge).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    // ── Counts ──
    pub trades_count: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,

    // ── P&L ──
    pub total_profit_and_loss: f64,
    pub final_balance: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub average_winning_trade: f64,
    pub average_losing_trade: f64,
    pub largest_winning_trade: f64,
    pub largest_losing_trade: f64,
    pub profit_factor: ProfitFactor,
    pub expectancy: f64,
    pub expectancy_percentage: f64,

    // ── Per-trade returns ──
    pub win_rate: f64,
    pub best_trade_percentage: f64,
    pub worst_trade_percentage: f64,

    // ── Drawdown ──
    pub max_draw_down_percentage: f64,
    pub average_draw_down_percentage: f64,
    pub max_draw_down_duration_days: i64,

    // ── Period ──
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: i64,

    // ── Return / risk ──
    pub total_return_percentage: f64,
    pub annual_return_percentage: f64,
    pub annual_volatility: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,

    // ── Sizing / quality ──
    pub kelly_criterion: f64,
    pub fractional_kelly: f64,
    pub kelly_interpretation: KellyRating,
    pub risk_of_ruin: f64,
    pub sqn: f64,
    pub sqn_interpretation: SqnRating,
    pub confidence_level: f64,

    // ── Market risk ──
    // Without `CompileOptions::benchmark_returns` the strategy is its own
    // benchmark: beta and correlation are 1, the rest 0, for every run.
    // Rank on these only when a benchmark is set.
    /// Annualized, in percent. 0.0 unless a benchmark is set.
    pub alpha: f64,
    /// 1.0 for any varying run unless a benchmark is set.
    pub beta: f64,
    pub information_ratio: f64,
    pub tracking_error: f64,
    pub market_correlation: f64,
}

impl TradeStats {
    /// Name of the first floating-point field that is NaN or infinite.
    ///
    /// `profit_factor` is excluded: its infinite case is tagged.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let fields = [
            ("total_profit_and_loss", self.total_profit_and_loss),
            ("final_balance", self.final_balance),
            ("gross_profit", self.gross_profit),
            ("gross_loss", self.gross_loss),
            ("average_winning_trade", self.average_winning_trade),
            ("average_losing_trade", self.average_losing_trade),
            ("largest_winning_trade", self.largest_winning_trade),
            ("largest_losing_trade", self.largest_losing_trade),
            ("expectancy", self.expectancy),
            ("expectancy_percentage", self.expectancy_percentage),
            ("win_rate", self.win_rate),
            ("best_trade_percentage", self.best_trade_percentage),
            ("worst_trade_percentage", self.worst_trade_percentage),
            ("max_draw_down_percentage", self.max_draw_down_percentage),
            ("average_draw_down_percentage", self.average_draw_down_percentage),
            ("total_return_percentage", self.total_return_percentage),
            ("annual_return_percentage", self.annual_return_percentage),
            ("annual_volatility", self.annual_volatility),
            ("sharpe_ratio", self.sharpe_ratio),
            ("sortino_ratio", self.sortino_ratio),
            ("calmar_ratio", self.calmar_ratio),
            ("kelly_criterion", self.kelly_criterion),
            ("fractional_kelly", self.fractional_kelly),
            ("risk_of_ruin", self.risk_of_ruin),
            ("sqn", self.sqn),
            ("confidence_level", self.confidence_level),
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("information_ratio", self.information_ratio),
            ("tracking_error", self.tracking_error),
            ("market_correlation", self.market_correlation),
        ];
        fields
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }

    /// One-line human summary, suitable for logs.
    pub fn summary_line(&self) -> String {
        format!(
            "trades={} pnl={:.2} win_rate={:.1}% pf={} max_dd={:.2}% sharpe={:.3} sqn={:.2} ({})",
            self.trades_count,
            self.total_profit_and_loss,
            self.win_rate,
            self.profit_factor,
            self.max_draw_down_percentage,
            self.sharpe_ratio,
            self.sqn,
            self.sqn_interpretation,
        )
    }
}

/// A compiled ledger. Read-only: nothing here admits new events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub(super) ledger: Ledger,
    pub(super) options: CompileOptions,
    pub(super) trade_pairs_chronological: Vec<TradePair>,
    pub(super) stats: TradeStats,
}

impl Report {
    pub fn stats(&self) -> &TradeStats {
        &self.stats
    }

    pub fn trade_pairs_chronological(&self) -> &[TradePair] {
        &self.trade_pairs_chronological
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn starting_balance(&self) -> f64 {
        self.ledger.starting_balance()
    }

    pub fn position_open(&self) -> bool {
        self.ledger.position_open()
    }

    pub fn trades_count(&self) -> usize {
        self.ledger.trades_count()
    }

    pub fn events_most_recent_first(&self) -> &VecDeque<Event> {
        self.ledger.events_most_recent_first()
    }

    /// Compile the underlying ledger again with the same options.
    pub fn recompile(&self) -> Result<Report, LedgerError> {
        self.ledger.compile(&self.options)
    }

    /// Give back the ledger and statistics.
    pub fn into_parts(self) -> (Ledger, Vec<TradePair>, TradeStats) {
        (self.ledger, self.trade_pairs_chronological, self.stats)
    }
}
