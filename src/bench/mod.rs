//! Benchmark module
//! Batched timing and the per-sample measurement primitive

pub mod batch;
pub mod primitive;

pub use batch::{
    bench,
    bench_async,
    bench_result,
    bench_result_async,
    try_bench_result_async,
    DEFAULT_ITERATIONS,
};
pub use primitive::{Benchmark, BenchOptions, BenchOutcome, WarmupBenchmark};
