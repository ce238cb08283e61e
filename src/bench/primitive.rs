//! Sample measurement primitive
//! One warmup + timed batch cycle per call, producing a single ops/s data point

use async_trait::async_trait;
use tracing::trace;

use super::batch::try_bench_result_async;
use crate::runner::Runner;

/// Settings for one measurement
#[derive(Debug, Clone)]
pub struct BenchOptions {
    pub title: String,
    /// Untimed invocations before the measured batch
    pub warmup: u64,
    /// Measured invocations
    pub iter: u64,
}

/// What one measurement observed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchOutcome {
    pub iter: u64,
    pub total_ms: f64,
}

impl BenchOutcome {
    /// `round(iter * 1000 / total_ms)`, saturating at `u64::MAX` when the
    /// batch was faster than the clock resolution.
    pub fn ops_per_second(&self) -> u64 {
        let ops = (self.iter as f64 * 1000.0 / self.total_ms).round();
        if ops.is_nan() {
            0
        } else {
            ops as u64
        }
    }
}

/// Produces one sample for a runner. Implementations must invoke the runner
/// sequentially and surface the first invocation error.
#[async_trait]
pub trait Benchmark: Send + Sync {
    async fn measure(&self, runner: &Runner, opts: &BenchOptions) -> anyhow::Result<BenchOutcome>;
}

/// Default primitive: `warmup` untimed calls, then `iter` calls timed as one batch
#[derive(Debug, Clone, Copy, Default)]
pub struct WarmupBenchmark;

#[async_trait]
impl Benchmark for WarmupBenchmark {
    async fn measure(&self, runner: &Runner, opts: &BenchOptions) -> anyhow::Result<BenchOutcome> {
        for _ in 0..opts.warmup {
            runner.call().await?;
        }

        let (_, total_ms) = try_bench_result_async(|| runner.call(), opts.iter).await?;
        trace!(title = %opts.title, iter = opts.iter, total_ms, "measured batch");

        Ok(BenchOutcome {
            iter: opts.iter,
            total_ms,
        })
    }
}
