//! Tick replay: feed a recorded action stream through a ledger and compile.

use ledgerlab_core::{Action, Candle, LedgerError, Report};
use thiserror::Error;

use crate::config::{ConfigError, RunConfig};

/// Errors from a replayed run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Admit every `(candle, action)` tick in order, then compile once.
///
/// Tick indices are assigned by position in the stream.
pub fn run_ticks<I>(config: &RunConfig, ticks: I) -> Result<Report, RunError>
where
    I: IntoIterator<Item = (Candle, Action)>,
{
    config.validate()?;
    let mut ledger = config.to_ledger()?;

    let mut offered = 0_usize;
    let mut rejected = 0_usize;
    for (index, (candle, action)) in ticks.into_iter().enumerate() {
        offered += 1;
        if !ledger.record(index, candle, action).is_admitted() {
            rejected += 1;
        }
    }

    let report = ledger.compile(config.compile_options())?;
    tracing::info!(
        offered,
        rejected,
        metric = %config.ranking_metric,
        value = config.ranking_metric.extract(report.stats()),
        "run compiled: {}",
        report.stats().summary_line()
    );
    Ok(report)
}

/// Replay several independent runs that share one config.
pub fn run_many<I, T>(config: &RunConfig, runs: I) -> Result<Vec<Report>, RunError>
where
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = (Candle, Action)>,
{
    runs.into_iter()
        .map(|ticks| run_ticks(config, ticks))
        .collect()
}
