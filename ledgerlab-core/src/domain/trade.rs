//! TradePair: a completed round trip from entry event to exit event.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Event, Side};
use crate::stats::saturate;

/// A matched opener/closer pair with the account balance around it.
///
/// `exit.action` is expected to be the closing counterpart of
/// `entry.action`; see `engine::pairing` for how mismatches are realized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePair {
    pub entry: Event,
    pub exit: Event,
    pub balance_before: f64,
    pub balance_after: f64,
}

impl TradePair {
    /// Realized P&L of the round trip, side-aware and computed from the
    /// execution prices. A pair opened without a side realizes nothing.
    pub fn pnl(&self) -> f64 {
        match self.side() {
            Some(side) => side.realized(self.entry.price(), self.exit.price()),
            None => 0.0,
        }
    }

    /// Return in percent of the balance the trade was opened with.
    ///
    /// Returns scale with the compounding balance, not the entry price. Once
    /// the account is at or below zero there is no capital to measure
    /// against and the return is 0.0; a near-zero balance saturates at
    /// `±f64::MAX`.
    pub fn return_pct(&self) -> f64 {
        if self.balance_before <= 0.0 {
            return 0.0;
        }
        saturate(self.pnl() / self.balance_before * 100.0)
    }

    /// Fractional return (`return_pct / 100`).
    pub fn return_fraction(&self) -> f64 {
        self.return_pct() / 100.0
    }

    pub fn is_winner(&self) -> bool {
        self.pnl() > 0.0
    }

    pub fn is_loser(&self) -> bool {
        self.pnl() < 0.0
    }

    pub fn side(&self) -> Option<Side> {
        self.entry.action.side()
    }

    pub fn entry_date(&self) -> Option<NaiveDate> {
        self.entry.date()
    }

    pub fn exit_date(&self) -> Option<NaiveDate> {
        self.exit.date()
    }

    /// Calendar days held; `None` when either leg has no timestamp.
    pub fn days_held(&self) -> Option<i64> {
        Some((self.exit_date()? - self.entry_date()?).num_days())
    }
}
