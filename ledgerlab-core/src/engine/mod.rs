//! Ledger engine: admission, trade pairing, drawdown and compilation.
//!
//! A run has two phases:
//!
//! 1. Admission: one `(candle, action)` per tick, gated by the
//!    `Flat`/`Open` state machine. Admitted events are kept newest first.
//! 2. Compilation: once, after the last tick. Events are paired into
//!    chronological trades, and drawdown plus every metric are computed
//!    into a `Report`.

pub mod admission;
pub mod compile;
pub mod drawdown;
pub mod ledger;
pub mod pairing;
pub mod report;

pub use admission::{transition, Admission, PositionState, RejectReason};
pub use compile::CompileOptions;
pub use drawdown::DrawdownStats;
pub use ledger::Ledger;
pub use pairing::{compile_trade_pairs, legacy_total_pnl};
pub use report::{Report, TradeStats};
