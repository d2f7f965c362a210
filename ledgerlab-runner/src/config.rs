//! Serializable run configuration, loaded from TOML.
//!
//! ```toml
//! ranking_metric = "sharpe_ratio"
//!
//! [ledger]
//! starting_balance = 10000.0
//! start_date = "2024-01-01"
//! end_date = "2024-12-31"
//!
//! [compile]
//! risk_free_rate = 0.0
//! periods_per_year = 252.0
//! kelly_fraction = 0.25
//! ```
//!
//! Only `[ledger].starting_balance` is required. Unknown keys are ignored so
//! files written for newer versions keep loading.

use chrono::NaiveDate;
use ledgerlab_core::{CompileOptions, Ledger, LedgerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::metric::ReportMetric;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Configuration for a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Metric used to rank this run against others.
    #[serde(default)]
    pub ranking_metric: ReportMetric,

    pub ledger: LedgerSection,

    #[serde(default)]
    pub compile: CompileOptions,
}

/// Account and simulated period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSection {
    pub starting_balance: f64,

    /// First simulated day (inclusive)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Last simulated day (inclusive)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl RunConfig {
    pub fn new(starting_balance: f64) -> Self {
        Self {
            ranking_metric: ReportMetric::default(),
            ledger: LedgerSection {
                starting_balance,
                start_date: None,
                end_date: None,
            },
            compile: CompileOptions::default(),
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), metric = %config.ranking_metric, "config loaded");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Check the ledger section and compile options with the same rules the
    /// core applies, so a config that validates always builds a ledger.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_ledger()?;
        self.compile.validate()?;
        Ok(())
    }

    /// Fresh, empty ledger for this run.
    pub fn to_ledger(&self) -> Result<Ledger, ConfigError> {
        let ledger = Ledger::new(self.ledger.starting_balance)?
            .with_date_bounds(self.ledger.start_date, self.ledger.end_date)?;
        Ok(ledger)
    }

    pub fn compile_options(&self) -> &CompileOptions {
        &self.compile
    }
}
