//! Compile orchestrator: ledger in, `Report` out.
//!
//! Pairing runs first, then drawdown and every metric over the same
//! chronological trade list. Statistics are assembled field by field into
//! `TradeStats`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::report::{Report, TradeStats};
use super::{drawdown, pairing, Ledger};
use crate::domain::TradePair;
use crate::error::LedgerError;
use crate::stats::{kelly, market, returns, sqn, trades, KellyRating, SqnRating};

/// Knobs for `Ledger::compile`. Every field has a default, so older callers
/// and config files keep working when new options appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct CompileOptions {
    /// Per-trade risk-free return used by Sharpe, Sortino and alpha.
    pub risk_free_rate: f64,
    /// Periods per year for annual volatility and market-risk scaling.
    pub periods_per_year: f64,
    /// Multiplier applied to full Kelly.
    pub kelly_fraction: f64,
    /// Benchmark return per trade, aligned with the trade list.
    pub benchmark_returns: Option<Vec<f64>>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            periods_per_year: 252.0,
            kelly_fraction: kelly::DEFAULT_KELLY_FRACTION,
            benchmark_returns: None,
        }
    }
}

impl CompileOptions {
    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    pub fn with_periods_per_year(mut self, periods_per_year: f64) -> Self {
        self.periods_per_year = periods_per_year;
        self
    }

    pub fn with_kelly_fraction(mut self, kelly_fraction: f64) -> Self {
        self.kelly_fraction = kelly_fraction;
        self
    }

    pub fn with_benchmark_returns(mut self, benchmark_returns: Vec<f64>) -> Self {
        self.benchmark_returns = Some(benchmark_returns);
        self
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if !self.risk_free_rate.is_finite() {
            return Err(invalid("risk_free_rate", "must be finite"));
        }
        if !self.periods_per_year.is_finite() || self.periods_per_year <= 0.0 {
            return Err(invalid("periods_per_year", "must be a positive number"));
        }
        if !self.kelly_fraction.is_finite() || !(0.0..=1.0).contains(&self.kelly_fraction) {
            return Err(invalid("kelly_fraction", "must be within [0, 1]"));
        }
        if let Some(benchmark) = &self.benchmark_returns {
            if let Some(pos) = benchmark.iter().position(|r| !r.is_finite()) {
                return Err(invalid(
                    "benchmark_returns",
                    &format!("value at position {pos} is not finite"),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &str) -> LedgerError {
    LedgerError::InvalidOption {
        name,
        reason: reason.to_string(),
    }
}

impl Ledger {
    /// Compile the ledger into a `Report`. The ledger is left untouched, so
    /// compiling twice yields equal reports.
    pub fn compile(&self, options: &CompileOptions) -> Result<Report, LedgerError> {
        options.validate()?;

        let trade_pairs_chronological =
            pairing::compile_trade_pairs(self.events_most_recent_first(), self.starting_balance());

        if trade_pairs_chronological.len() != self.trades_count() {
            return Err(LedgerError::Calculation(format!(
                "{} closed trades recorded but {} pairs compiled",
                self.trades_count(),
                trade_pairs_chronological.len()
            )));
        }

        let stats = self.trade_stats(&trade_pairs_chronological, options);
        if let Some(field) = stats.first_non_finite() {
            return Err(LedgerError::Calculation(format!(
                "statistic '{field}' is not finite"
            )));
        }

        tracing::debug!(summary = %stats.summary_line(), "ledger compiled");

        Ok(Report {
            ledger: self.clone(),
            options: options.clone(),
            trade_pairs_chronological,
            stats,
        })
    }

    /// First and last simulated dates: the configured bounds, else the dates
    /// of the oldest and newest admitted events.
    fn period(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let start = self
            .start_date()
            .or_else(|| self.events_chronological().find_map(|e| e.date()));
        let end = self
            .end_date()
            .or_else(|| self.events_most_recent_first().iter().find_map(|e| e.date()));
        (start, end)
    }

    fn trade_stats(&self, pairs: &[TradePair], options: &CompileOptions) -> TradeStats {
        let starting_balance = self.starting_balance();
        let trades_count = pairs.len();

        let total_profit_and_loss = trades::total_pnl(pairs);
        let final_balance = pairs
            .last()
            .map_or(starting_balance, |p| p.balance_after);

        let (start_date, end_date) = self.period();
        let duration_days = match (start_date, end_date) {
            (Some(start), Some(end)) => (end - start).num_days().max(0),
            _ => 0,
        };

        let drawdown = drawdown::compute(pairs, starting_balance, start_date);

        let fractional_returns = returns::trade_returns(pairs);
        let percent_returns = returns::trade_returns_pct(pairs);

        let win_rate = trades::win_rate(pairs);
        let best_trade_percentage = trades::best_trade_pct(pairs);
        let worst_trade_percentage = trades::worst_trade_pct(pairs);
        let average_winning_trade = trades::average_winning_trade(pairs);
        let average_losing_trade = trades::average_losing_trade(pairs);

        let annual_return_percentage =
            returns::cagr_pct(starting_balance, final_balance, duration_days);

        let kelly_criterion =
            kelly::kelly_criterion(win_rate, average_winning_trade, average_losing_trade);
        let sqn = sqn::sqn(&fractional_returns);

        let market = market::market_risk(
            &fractional_returns,
            options.benchmark_returns.as_deref(),
            options.risk_free_rate,
            options.periods_per_year,
        );

        TradeStats {
            trades_count,
            winning_trades: trades::winning_trades(pairs),
            losing_trades: trades::losing_trades(pairs),

            total_profit_and_loss,
            final_balance,
            gross_profit: trades::gross_profit(pairs),
            gross_loss: trades::gross_loss(pairs),
            average_winning_trade,
            average_losing_trade,
            largest_winning_trade: trades::largest_winning_trade(pairs),
            largest_losing_trade: trades::largest_losing_trade(pairs),
            profit_factor: trades::profit_factor(pairs),
            expectancy: trades::expectancy(total_profit_and_loss, trades_count),
            expectancy_percentage: trades::expectancy_pct(
                total_profit_and_loss,
                trades_count,
                starting_balance,
            ),

            win_rate,
            best_trade_percentage,
            worst_trade_percentage,

            max_draw_down_percentage: drawdown.max_percentage,
            average_draw_down_percentage: drawdown.average_percentage,
            max_draw_down_duration_days: drawdown.max_duration_days,

            start_date,
            end_date,
            duration_days,

            total_return_percentage: returns::total_return_pct(starting_balance, final_balance),
            annual_return_percentage,
            annual_volatility: returns::annual_volatility_pct(
                &percent_returns,
                options.periods_per_year,
            ),
            sharpe_ratio: returns::sharpe_ratio(&fractional_returns, options.risk_free_rate),
            sortino_ratio: returns::sortino_ratio(&fractional_returns, options.risk_free_rate),
            calmar_ratio: returns::calmar_ratio(annual_return_percentage, drawdown.max_percentage),

            kelly_criterion,
            fractional_kelly: kelly::fractional_kelly(kelly_criterion, options.kelly_fraction),
            kelly_interpretation: KellyRating::from_kelly(kelly_criterion),
            risk_of_ruin: kelly::risk_of_ruin(
                win_rate,
                best_trade_percentage,
                worst_trade_percentage,
            ),
            sqn,
            sqn_interpretation: SqnRating::from_sqn(sqn),
            confidence_level: sqn::confidence_level(&fractional_returns),

            alpha: market.alpha,
            beta: market.beta,
            information_ratio: market.information_ratio,
            tracking_error: market.tracking_error,
            market_correlation: market.correlation,
        }
    }
}
