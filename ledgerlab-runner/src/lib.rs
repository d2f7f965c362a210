//! LedgerLab Runner: run configuration, tick replay and metric ranking.
//!
//! Components:
//! - `config`: TOML run configuration (`RunConfig`) and validation
//! - `replay`: feed `(candle, action)` ticks through a ledger and compile
//! - `metric`: `ReportMetric`, the named selector used to rank runs
//! - `telemetry`: `tracing` subscriber setup

pub mod config;
pub mod metric;
pub mod replay;
pub mod telemetry;

pub use config::{ConfigError, LedgerSection, RunConfig};
pub use metric::{ReportMetric, UnknownMetric};
pub use replay::{run_many, run_ticks, RunError};
pub use telemetry::init_tracing;
