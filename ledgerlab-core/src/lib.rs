//! LedgerLab Core: trade ledger, trade-pair compiler and performance metrics.
//!
//! This crate is the accounting side of a backtest:
//! - Domain types (candles, actions, admitted events, trade pairs)
//! - Admission state machine for a single position
//! - Trade-pair compiler with side-aware P&L and a running balance
//! - Drawdown engine over the trade equity curve
//! - Metric library (win rate, profit factor, Sharpe/Sortino/Calmar, CAGR,
//!   Kelly, SQN, market risk)
//!
//! Strategy logic, order execution and data loading live elsewhere. The
//! driver feeds one action per tick into a `Ledger` and compiles it once.

pub mod domain;
pub mod engine;
pub mod error;
pub mod stats;

pub use domain::{Action, Candle, Event, Side, TradePair};
pub use engine::{CompileOptions, Ledger, Report, TradeStats};
pub use error::LedgerError;
pub use stats::{KellyRating, MarketRisk, ProfitFactor, SqnRating};
