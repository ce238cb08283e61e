//! opsbench
//!
//! Micro-benchmarking harness: runs user callables repeatedly, turns each
//! sample pass into an ops/s figure, trims outliers and ranks test cases
//! against the fastest one.
//!
//! ## Architecture
//! - Clock: process-anchored monotonic nanosecond timestamps
//! - Timed: single-shot timing for sync and deferred closures
//! - Bench: batched timing and the warmup + measure sample primitive
//! - Stats: outlier-trimmed min/max/avg over ops/s samples
//! - Provider: pluggable test-case loading (in-process registry, JSON manifests)
//! - Harness: sequential sampling driver, progress display, ranked report

pub mod bench;
pub mod clock;
pub mod config;
pub mod error;
pub mod harness;
pub mod provider;
pub mod report;
pub mod runner;
pub mod stats;
pub mod timed;

pub use bench::{bench, bench_result, Benchmark, BenchOptions, BenchOutcome, WarmupBenchmark};
pub use config::BenchConfig;
pub use error::{ConfigError, HarnessError, LoadError};
pub use harness::{Harness, MallocTrim, NoRelief, PressureRelief, TestCase};
pub use provider::{CaseDescriptor, Export, ManifestProvider, RegistryProvider, TestCaseProvider};
pub use report::{Report, ReportEntry};
pub use runner::Runner;
pub use stats::OpsStat;
pub use timed::{timed, timed_result, TimingResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_end_to_end_registry() {
        let registry = RegistryProvider::new();
        registry.register(
            "sum.rs",
            Export::Single(CaseDescriptor::titled(
                "sum",
                Runner::sync(|| {
                    let total: u64 = (0..64u64).sum();
                    std::hint::black_box(total);
                    Ok(())
                }),
            )),
        );
        registry.register(
            "yield.rs",
            Export::Single(CaseDescriptor::titled(
                "yield",
                Runner::deferred(|| async {
                    tokio::task::yield_now().await;
                    Ok(())
                }),
            )),
        );

        let config = BenchConfig {
            warmup: 2,
            sample: 5,
            cooldown_ms: 0,
            ..Default::default()
        };
        let mut harness = Harness::new(config, registry)
            .with_pressure_relief(MallocTrim)
            .with_output(std::io::sink());

        let report = harness.run(&["sum.rs", "yield.rs"]).await.unwrap();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.fastest().unwrap().lag, 0.0);
        assert!(report.entries.iter().all(|e| (0.0..=1.0).contains(&e.lag)));
        assert!(report.entries.iter().all(|e| e.stat.min <= e.stat.max));
    }
}
