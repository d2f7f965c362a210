//! Action: what the strategy asked for on a tick.

use serde::{Deserialize, Serialize};

/// Strategy action emitted once per tick.
///
/// `None` is the explicit no-action signal. The ledger never sees a raw tag
/// or a missing value; every tick carries exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Buy,
    Sell,
    CloseBuy,
    CloseSell,
    None,
}

/// Direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
}

impl Action {
    /// True for `CloseBuy` and `CloseSell` only.
    pub fn is_closer(&self) -> bool {
        matches!(self, Action::CloseBuy | Action::CloseSell)
    }

    /// Side opened by this action. `None` for closers and the no-action signal.
    pub fn side(&self) -> Option<Side> {
        match self {
            Action::Buy => Some(Side::Long),
            Action::Sell => Some(Side::Short),
            Action::CloseBuy | Action::CloseSell | Action::None => None,
        }
    }

    /// The closer that matches this opener.
    pub fn closing_counterpart(&self) -> Option<Action> {
        match self {
            Action::Buy => Some(Action::CloseBuy),
            Action::Sell => Some(Action::CloseSell),
            Action::CloseBuy | Action::CloseSell | Action::None => None,
        }
    }

    /// Whether `self` is the closer paired with `entry`.
    pub fn closes(&self, entry: Action) -> bool {
        entry.closing_counterpart() == Some(*self)
    }
}

impl Side {
    /// Signed move for this side when the price goes from `entry` to `exit`.
    pub fn realized(&self, entry: f64, exit: f64) -> f64 {
        match self {
            Side::Long => exit - entry,
            Side::Short => entry - exit,
        }
    }
}
