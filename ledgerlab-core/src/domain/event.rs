//! Event: one admitted action on one candle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Action, Candle};

/// An admitted occurrence: the candle it happened on, the action taken, and
/// the tick ordinal. Built by the admission step and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub candle: Candle,
    pub action: Action,
    pub index: usize,
}

impl Event {
    pub fn price(&self) -> f64 {
        self.candle.price()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.candle.date()
    }
}
