//! Ledger: the per-run accumulation of admitted events.
//!
//! One ledger per simulation run. The driver feeds it exactly one action per
//! tick; after the last tick, `compile` turns it into an immutable `Report`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::admission::{transition, Admission, PositionState};
use crate::domain::{Action, Candle, Event};
use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    starting_balance: f64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    /// Newest first: each admitted event is pushed to the front.
    events_most_recent_first: VecDeque<Event>,
    position: PositionState,
    trades_count: usize,
}

impl Ledger {
    /// Empty ledger for one run. The starting balance must be a positive,
    /// finite amount: every percentage statistic is relative to it.
    pub fn new(starting_balance: f64) -> Result<Self, LedgerError> {
        if !starting_balance.is_finite() || starting_balance <= 0.0 {
            return Err(LedgerError::InvalidStartingBalance(starting_balance));
        }
        Ok(Self {
            starting_balance,
            start_date: None,
            end_date: None,
            events_most_recent_first: VecDeque::new(),
            position: PositionState::Flat,
            trades_count: 0,
        })
    }

    /// Set the simulated date range used for duration and annualization.
    pub fn with_date_bounds(
        mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, LedgerError> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(LedgerError::InvalidDateBounds { start, end });
            }
        }
        self.start_date = start_date;
        self.end_date = end_date;
        Ok(self)
    }

    /// Offer one tick's action, consuming and returning the ledger.
    pub fn admit(mut self, index: usize, candle: Candle, action: Action) -> Self {
        self.record(index, candle, action);
        self
    }

    /// Offer one tick's action in place and report what happened.
    pub fn record(&mut self, index: usize, candle: Candle, action: Action) -> Admission {
        let (next, admission) = transition(self.position, action);
        match admission {
            Admission::Opened | Admission::Closed => {
                self.events_most_recent_first.push_front(Event {
                    candle,
                    action,
                    index,
                });
                if admission == Admission::Closed {
                    self.trades_count += 1;
                }
            }
            Admission::Rejected(reason) => {
                tracing::trace!(index, ?action, ?reason, "action rejected");
            }
        }
        self.position = next;
        admission
    }

    pub fn starting_balance(&self) -> f64 {
        self.starting_balance
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn position(&self) -> PositionState {
        self.position
    }

    pub fn position_open(&self) -> bool {
        self.position == PositionState::Open
    }

    /// Number of admitted closers.
    pub fn trades_count(&self) -> usize {
        self.trades_count
    }

    pub fn events_most_recent_first(&self) -> &VecDeque<Event> {
        &self.events_most_recent_first
    }

    /// Events oldest first.
    pub fn events_chronological(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events_most_recent_first.iter().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.events_most_recent_first.is_empty()
    }
}
