//! Delay strategy and engine overhead benchmarks
//!
//! Measures per-attempt delay computation for each built-in strategy and
//! the cost of a zero-delay retry run.
//!
//! Run with: `cargo bench --bench delay_bench -p pulsearc-retry`

use std::future::ready;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pulsearc_retry::{CancelSignal, DelayStrategy, Failure, RetryConfig};
use tokio::runtime::Builder as RuntimeBuilder;

// ============================================================================
// Delay Strategy Benchmarks
// ============================================================================

fn bench_delay_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("delay_strategies");
    let base = Duration::from_millis(100);
    let max = Duration::from_secs(30);

    let strategies: [(&str, DelayStrategy<std::io::Error>); 4] = [
        ("fixed", DelayStrategy::fixed(base)),
        ("linear", DelayStrategy::linear(base, max)),
        ("exponential", DelayStrategy::exponential(base, max)),
        ("random", DelayStrategy::random_seeded(base, max, 42)),
    ];
    let err = std::io::Error::other("benchmark failure");

    for (name, strategy) in &strategies {
        for attempt in [0_u32, 8, 64] {
            group.bench_with_input(BenchmarkId::new(*name, attempt), &attempt, |b, &n| {
                b.iter(|| black_box(strategy.delay(black_box(n), &err)));
            });
        }
    }

    group.finish();
}

// ============================================================================
// Engine Benchmarks
// ============================================================================

fn bench_engine_zero_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_zero_delay");
    let runtime = match RuntimeBuilder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => panic!("failed to build benchmark runtime: {err}"),
    };
    let signal = CancelSignal::new();

    for failures in [0_u32, 4, 16] {
        let config = RetryConfig::<std::io::Error>::builder().times(failures).build();
        group.bench_with_input(BenchmarkId::new("run", failures), &failures, |b, &failures| {
            b.iter(|| {
                let mut calls = 0_u32;
                let result = runtime.block_on(config.run(&signal, || {
                    calls += 1;
                    ready(if calls <= failures {
                        Err(Failure::Retryable(std::io::Error::other("benchmark failure")))
                    } else {
                        Ok(())
                    })
                }));
                black_box(result)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_delay_strategies, bench_engine_zero_delay);
criterion_main!(benches);
