//! Candle: the market data unit the ledger records against.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::LedgerError;

/// OHLCV candle for the single traded instrument.
///
/// `close` is the execution price: every fill, P&L and return in this crate
/// is computed from it. `extra` carries passthrough columns (indicator
/// output, source tags) untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Candle {
    /// Build a candle, rejecting NaN or infinite prices.
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Result<Self, LedgerError> {
        for (field, value) in [("open", open), ("high", high), ("low", low), ("close", close)] {
            if !value.is_finite() {
                return Err(LedgerError::NonFiniteField { field, value });
            }
        }
        Ok(Self {
            open,
            high,
            low,
            close,
            volume: None,
            timestamp: None,
            extra: BTreeMap::new(),
        })
    }

    /// Candle whose four prices all equal `price`. Handy for fixtures.
    pub fn flat(price: f64) -> Result<Self, LedgerError> {
        Self::new(price, price, price, price)
    }

    pub fn with_volume(mut self, volume: f64) -> Result<Self, LedgerError> {
        if !volume.is_finite() {
            return Err(LedgerError::NonFiniteField {
                field: "volume",
                value: volume,
            });
        }
        self.volume = Some(volume);
        Ok(self)
    }

    /// Attach a timestamp parsed from a date or date-time string.
    pub fn with_timestamp(mut self, raw: &str) -> Result<Self, LedgerError> {
        self.timestamp = Some(parse_timestamp(raw)?);
        Ok(self)
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Execution price.
    pub fn price(&self) -> f64 {
        self.close
    }

    /// Calendar day of the timestamp, if any. Intraday detail is dropped.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }
}

/// Parse the timestamp formats accepted on candles.
///
/// Date-only input lands on midnight; RFC 3339 input is converted to its
/// naive UTC wall time.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, LedgerError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight);
        }
    }
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(ts);
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_utc())
        .map_err(|_| LedgerError::InvalidTimestamp(raw.to_string()))
}
