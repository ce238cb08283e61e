//! Overhead of the timing wrappers and the statistics pass

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opsbench::bench::bench_result;
use opsbench::{timed_result, OpsStat};

fn bench_timed_result(c: &mut Criterion) {
    c.bench_function("timed_result noop", |b| {
        b.iter(|| timed_result(|| black_box(1u64)))
    });
}

fn bench_batch(c: &mut Criterion) {
    c.bench_function("bench_result 1000 noops", |b| {
        b.iter(|| bench_result(|| black_box(1u64), 1000))
    });
}

fn bench_ops_stat(c: &mut Criterion) {
    let ops: Vec<u64> = (0..50u64).map(|i| (i * 7919) % 100_003).collect();
    c.bench_function("OpsStat::from_ops 50 samples", |b| {
        b.iter(|| OpsStat::from_ops(black_box(&ops)))
    });
}

criterion_group!(benches, bench_timed_result, bench_batch, bench_ops_stat);
criterion_main!(benches);
