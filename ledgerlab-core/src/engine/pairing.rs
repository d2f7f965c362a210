//! Trade-pair compiler: turns admitted events into round-trip trades.
//!
//! Admission guarantees events alternate opener/closer, so every closer is
//! matched with the event immediately before it. A trailing opener (position
//! still open when the run ended) produces no pair.

use std::collections::VecDeque;

use crate::domain::{Event, TradePair};

/// Pair events into trades with a running balance, oldest trade first.
pub fn compile_trade_pairs(
    events_most_recent_first: &VecDeque<Event>,
    starting_balance: f64,
) -> Vec<TradePair> {
    let mut trade_pairs_chronological = Vec::with_capacity(events_most_recent_first.len() / 2);
    let mut balance = starting_balance;
    let mut pending: Option<&Event> = None;

    for event in events_most_recent_first.iter().rev() {
        if !event.action.is_closer() {
            if let Some(stale) = pending {
                tracing::warn!(
                    stale_index = stale.index,
                    index = event.index,
                    "opener replaced an unclosed opener"
                );
            }
            pending = Some(event);
            continue;
        }

        let Some(entry) = pending.take() else {
            tracing::warn!(index = event.index, "closer without an opener skipped");
            continue;
        };

        check_counterpart(entry, event);

        let mut pair = TradePair {
            entry: entry.clone(),
            exit: event.clone(),
            balance_before: balance,
            balance_after: balance,
        };
        balance += pair.pnl();
        pair.balance_after = balance;
        trade_pairs_chronological.push(pair);
    }

    trade_pairs_chronological
}

/// Sum of realized P&L straight from the event stream, without building
/// pairs. Must agree with the sum over `compile_trade_pairs`.
pub fn legacy_total_pnl(events_most_recent_first: &VecDeque<Event>) -> f64 {
    let mut total = 0.0;
    let mut open: Option<&Event> = None;

    for event in events_most_recent_first.iter().rev() {
        if !event.action.is_closer() {
            open = Some(event);
            continue;
        }
        if let Some(entry) = open.take() {
            if let Some(side) = entry.action.side() {
                total += side.realized(entry.price(), event.price());
            }
        }
    }
    total
}

fn check_counterpart(entry: &Event, exit: &Event) {
    if entry.action.side().is_none() {
        tracing::warn!(
            entry_index = entry.index,
            exit_index = exit.index,
            "position opened without a side; pair realizes zero"
        );
    } else if !exit.action.closes(entry.action) {
        tracing::warn!(
            entry_index = entry.index,
            exit_index = exit.index,
            entry_action = ?entry.action,
            exit_action = ?exit.action,
            "closer does not match opener; realizing by entry side"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Action, Candle};
    use crate::engine::Ledger;

    fn ledger(starting_balance: f64, steps: &[(f64, Action)]) -> Ledger {
        steps
            .iter()
            .enumerate()
            .fold(Ledger::new(starting_balance).unwrap(), |l, (i, &(p, a))| {
                l.admit(i, Candle::flat(p).unwrap(), a)
            })
    }

    #[test]
    fn no_events_no_pairs() {
        let l = ledger(100.0, &[]);
        assert!(compile_trade_pairs(l.events_most_recent_first(), 100.0).is_empty());
    }

    #[test]
    fn long_pair_realizes_exit_minus_entry() {
        let l = ledger(100.0, &[(0.0, Action::Buy), (10.0, Action::CloseBuy)]);
        let pairs = compile_trade_pairs(l.events_most_recent_first(), 100.0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].pnl(), 10.0);
        assert_eq!(pairs[0].balance_before, 100.0);
        assert_eq!(pairs[0].balance_after, 110.0);
    }

    #[test]
    fn short_pair_realizes_entry_minus_exit() {
        let l = ledger(100.0, &[(10.0, Action::Sell), (4.0, Action::CloseSell)]);
        let pairs = compile_trade_pairs(l.events_most_recent_first(), 100.0);
        assert_eq!(pairs[0].pnl(), 6.0);
        assert_eq!(pairs[0].balance_after, 106.0);
    }

    #[test]
    fn running_balance_chains_pairs_in_order() {
        let l = ledger(
            100.0,
            &[
                (0.0, Action::Buy),
                (10.0, Action::CloseBuy),
                (10.0, Action::Buy),
                (0.0, Action::CloseBuy),
                (5.0, Action::Sell),
                (2.0, Action::CloseSell),
            ],
        );
        let pairs = compile_trade_pairs(l.events_most_recent_first(), 100.0);
        let balances: Vec<f64> = pairs.iter().map(|p| p.balance_after).collect();
        assert_eq!(balances, vec![110.0, 100.0, 103.0]);
        assert_eq!(pairs[1].balance_before, 110.0);
        assert_eq!(pairs[0].entry.index, 0);
        assert_eq!(pairs[2].exit.index, 5);
    }

    #[test]
    fn trailing_open_position_is_ignored() {
        let l = ledger(
            100.0,
            &[(1.0, Action::Buy), (2.0, Action::CloseBuy), (3.0, Action::Buy)],
        );
        assert!(l.position_open());
        let pairs = compile_trade_pairs(l.events_most_recent_first(), 100.0);
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn mismatched_closer_uses_entry_side() {
        let l = ledger(100.0, &[(5.0, Action::Buy), (8.0, Action::CloseSell)]);
        let pairs = compile_trade_pairs(l.events_most_recent_first(), 100.0);
        assert_eq!(pairs[0].pnl(), 3.0);
    }

    #[test]
    fn phantom_position_realizes_zero() {
        let l = ledger(100.0, &[(5.0, Action::None), (8.0, Action::CloseBuy)]);
        assert_eq!(l.trades_count(), 1);
        let pairs = compile_trade_pairs(l.events_most_recent_first(), 100.0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].pnl(), 0.0);
        assert_eq!(pairs[0].balance_after, 100.0);
    }

    #[test]
    fn legacy_total_agrees_with_pairs() {
        let l = ledger(
            50.0,
            &[
                (3.0, Action::Buy),
                (7.5, Action::CloseBuy),
                (9.0, Action::Sell),
                (11.25, Action::CloseSell),
                (4.0, Action::Buy),
            ],
        );
        let pairs = compile_trade_pairs(l.events_most_recent_first(), 50.0);
        let summed: f64 = pairs.iter().map(|p| p.pnl()).sum();
        let legacy = legacy_total_pnl(l.events_most_recent_first());
        assert!((summed - legacy).abs() < 1e-12);
        assert!((legacy - 2.25).abs() < 1e-12);
    }
}
