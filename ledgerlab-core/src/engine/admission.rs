//! Admission state machine: which emitted actions enter the ledger.
//!
//! The decision depends only on whether a position is open and whether the
//! action is a closer:
//!
//! | state | closer | result                         |
//! |-------|--------|--------------------------------|
//! | Open  | yes    | admit, go Flat, count a trade  |
//! | Open  | no     | reject                         |
//! | Flat  | yes    | reject, nothing to close       |
//! | Flat  | no     | admit, go Open                 |
//!
//! `Action::None` is not a closer, so while flat it opens a position.

use serde::{Deserialize, Serialize};

use crate::domain::Action;

/// Whether the single position slot is occupied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionState {
    #[default]
    Flat,
    Open,
}

/// Outcome of offering one action to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Admission {
    Opened,
    Closed,
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// A non-closing action arrived while a position was open.
    PositionAlreadyOpen,
    /// A closer arrived while flat.
    NothingToClose,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        !matches!(self, Admission::Rejected(_))
    }
}

/// Total transition over `(state, action)`.
///
/// Returns the next state and whether the action is recorded.
pub fn transition(state: PositionState, action: Action) -> (PositionState, Admission) {
    match (state, action.is_closer()) {
        (PositionState::Open, true) => (PositionState::Flat, Admission::Closed),
        (PositionState::Open, false) => (
            PositionState::Open,
            Admission::Rejected(RejectReason::PositionAlreadyOpen),
        ),
        (PositionState::Flat, true) => (
            PositionState::Flat,
            Admission::Rejected(RejectReason::NothingToClose),
        ),
        (PositionState::Flat, false) => (PositionState::Open, Admission::Opened),
    }
}
