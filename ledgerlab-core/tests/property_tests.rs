//! Property tests for ledger invariants.
//!
//! Uses proptest to verify:
//! 1. Admission: events alternate opener/closer and trades_count counts closers
//! 2. Idempotence: compiling the same ledger twice gives equal reports
//! 3. Conservation: Σ pair P&L = total P&L = direct event sum
//! 4. Balance chaining: each pair opens at the previous pair's close
//! 5. Bounds: win rate in [0, 100], profit factor ≥ 0 or infinite
//! 6. Drawdown sign: max drawdown ≤ 0 and ≤ every sample

use proptest::prelude::*;
use ledgerlab_core::engine::drawdown::{drawdown_samples, equity_curve};
use ledgerlab_core::engine::{legacy_total_pnl, Admission};
use ledgerlab_core::{Action, Candle, CompileOptions, Ledger, ProfitFactor};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..1000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Buy),
        Just(Action::Sell),
        Just(Action::CloseBuy),
        Just(Action::CloseSell),
        Just(Action::None),
    ]
}

fn arb_ticks() -> impl Strategy<Value = Vec<(f64, Action)>> {
    prop::collection::vec((arb_price(), arb_action()), 0..200)
}

fn arb_balance() -> impl Strategy<Value = f64> {
    (1_000.0..100_000.0_f64).prop_map(|b| b.round())
}

fn build(starting_balance: f64, ticks: &[(f64, Action)]) -> (Ledger, usize) {
    let mut ledger = Ledger::new(starting_balance).unwrap();
    let mut closed = 0;
    for (i, &(price, action)) in ticks.iter().enumerate() {
        if ledger.record(i, Candle::flat(price).unwrap(), action) == Admission::Closed {
            closed += 1;
        }
    }
    (ledger, closed)
}

fn close_enough(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

// ── 1. Admission ─────────────────────────────────────────────────────

proptest! {
    /// Admitted events strictly alternate, starting with an opener.
    #[test]
    fn events_alternate(balance in arb_balance(), ticks in arb_ticks()) {
        let (ledger, closed) = build(balance, &ticks);
        for (i, event) in ledger.events_chronological().enumerate() {
            prop_assert_eq!(event.action.is_closer(), i % 2 == 1);
        }
        prop_assert_eq!(ledger.trades_count(), closed);
        prop_assert_eq!(ledger.position_open(), ledger.events_most_recent_first().len() % 2 == 1);
    }
}

// ── 2. Idempotence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn compile_is_idempotent(balance in arb_balance(), ticks in arb_ticks()) {
        let (ledger, _) = build(balance, &ticks);
        let options = CompileOptions::default();
        let first = ledger.compile(&options).unwrap();
        let second = ledger.compile(&options).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.recompile().unwrap(), first);
    }
}

// ── 3. Conservation ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn pnl_is_conserved(balance in arb_balance(), ticks in arb_ticks()) {
        let (ledger, closed) = build(balance, &ticks);
        let report = ledger.compile(&CompileOptions::default()).unwrap();
        let stats = report.stats();

        let summed: f64 = report.trade_pairs_chronological().iter().map(|p| p.pnl()).sum();
        let legacy = legacy_total_pnl(ledger.events_most_recent_first());

        prop_assert!(close_enough(summed, stats.total_profit_and_loss));
        prop_assert!(close_enough(legacy, stats.total_profit_and_loss));
        prop_assert!(close_enough(stats.final_balance, balance + stats.total_profit_and_loss));
        prop_assert_eq!(report.trade_pairs_chronological().len(), closed);
        prop_assert_eq!(stats.trades_count, closed);
    }
}

// ── 4. Balance chaining ──────────────────────────────────────────────

proptest! {
    #[test]
    fn balances_chain(balance in arb_balance(), ticks in arb_ticks()) {
        let (ledger, _) = build(balance, &ticks);
        let report = ledger.compile(&CompileOptions::default()).unwrap();
        let mut expected_before = balance;
        for pair in report.trade_pairs_chronological() {
            prop_assert_eq!(pair.balance_before, expected_before);
            prop_assert_eq!(pair.balance_after, pair.balance_before + pair.pnl());
            prop_assert!(pair.entry.index < pair.exit.index);
            expected_before = pair.balance_after;
        }
    }
}

// ── 5. Bounds ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn metric_bounds(balance in arb_balance(), ticks in arb_ticks()) {
        let (ledger, _) = build(balance, &ticks);
        let stats = ledger.compile(&CompileOptions::default()).unwrap().stats().clone();

        prop_assert!((0.0..=100.0).contains(&stats.win_rate));
        match stats.profit_factor {
            ProfitFactor::Finite(v) => prop_assert!(v >= 0.0 && v.is_finite()),
            ProfitFactor::Infinite => {
                prop_assert!(stats.gross_profit > 0.0);
                prop_assert_eq!(stats.gross_loss, 0.0);
            }
        }
        prop_assert!((0.0..=1.0).contains(&stats.risk_of_ruin));
        prop_assert!((0.0..=100.0).contains(&stats.confidence_level));
        prop_assert!(stats.gross_loss <= 0.0);
        prop_assert!(stats.best_trade_percentage >= stats.worst_trade_percentage);
        prop_assert_eq!(stats.winning_trades + stats.losing_trades <= stats.trades_count, true);
    }
}

// ── 6. Drawdown sign ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn drawdown_is_never_positive(balance in arb_balance(), ticks in arb_ticks()) {
        let (ledger, _) = build(balance, &ticks);
        let report = ledger.compile(&CompileOptions::default()).unwrap();
        let stats = report.stats();

        prop_assert!(stats.max_draw_down_percentage <= 0.0);
        prop_assert!(stats.average_draw_down_percentage <= 0.0);
        prop_assert!(stats.max_draw_down_percentage <= stats.average_draw_down_percentage);

        let curve = equity_curve(report.trade_pairs_chronological(), balance);
        for sample in drawdown_samples(&curve) {
            prop_assert!(sample <= 0.0);
            prop_assert!(stats.max_draw_down_percentage <= sample);
        }
    }
}
