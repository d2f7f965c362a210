//! Criterion benchmarks for the ledger hot paths.
//!
//! Benchmarks:
//! 1. Admission (one action per tick through the state machine)
//! 2. Full compile (pairing, drawdown and every metric)
//! 3. Trade-pair compiler alone

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ledgerlab_core::engine::compile_trade_pairs;
use ledgerlab_core::{Action, Candle, CompileOptions, Ledger};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_ticks(n: usize) -> Vec<(Candle, Action)> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let date = base_date + chrono::Duration::days(i as i64);
            let candle = Candle::new(close - 0.3, close + 1.5, close - 1.5, close)
                .unwrap()
                .with_timestamp(&date.to_string())
                .unwrap();
            let action = match i % 7 {
                0 => Action::Buy,
                3 => Action::CloseBuy,
                4 => Action::Sell,
                6 => Action::CloseSell,
                _ => Action::None,
            };
            (candle, action)
        })
        .collect()
}

fn make_ledger(n: usize) -> Ledger {
    make_ticks(n)
        .into_iter()
        .enumerate()
        .fold(Ledger::new(100_000.0).unwrap(), |ledger, (i, (candle, action))| {
            ledger.admit(i, candle, action)
        })
}

// ── 1. Admission ─────────────────────────────────────────────────────

fn bench_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("admission");

    for &tick_count in &[252, 1260, 2520] {
        let ticks = make_ticks(tick_count);
        group.bench_with_input(
            BenchmarkId::new("record", tick_count),
            &tick_count,
            |b, _| {
                b.iter(|| {
                    let mut ledger = Ledger::new(100_000.0).unwrap();
                    for (i, (candle, action)) in ticks.iter().enumerate() {
                        ledger.record(i, candle.clone(), *action);
                    }
                    black_box(ledger)
                });
            },
        );
    }

    group.finish();
}

// ── 2. Compile ───────────────────────────────────────────────────────

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let options = CompileOptions::default();

    for &tick_count in &[252, 1260, 2520] {
        let ledger = make_ledger(tick_count);
        group.bench_with_input(
            BenchmarkId::new("full_report", tick_count),
            &tick_count,
            |b, _| {
                b.iter(|| black_box(&ledger).compile(black_box(&options)));
            },
        );
    }

    group.finish();
}

// ── 3. Pairing ───────────────────────────────────────────────────────

fn bench_pairing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairing");
    let ledger = make_ledger(2520);

    group.bench_function("trade_pairs_2520_ticks", |b| {
        b.iter(|| {
            compile_trade_pairs(
                black_box(ledger.events_most_recent_first()),
                black_box(ledger.starting_balance()),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_admission, bench_compile, bench_pairing);
criterion_main!(benches);
