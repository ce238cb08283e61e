//! Harness driver
//! Loads test cases, samples each one in turn and ranks them

pub mod progress;
pub mod relief;

pub use progress::Progress;
pub use relief::{MallocTrim, NoRelief, PressureRelief};

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::bench::{Benchmark, BenchOptions, WarmupBenchmark};
use crate::config::BenchConfig;
use crate::error::{HarnessError, LoadError};
use crate::provider::{resolve_path, CaseDescriptor, Export, TestCaseProvider};
use crate::report::{Report, ReportEntry};
use crate::runner::Runner;
use crate::stats::OpsStat;

/// A loaded test case and the samples collected for it
#[derive(Debug, Clone)]
pub struct TestCase {
    pub title: String,
    pub filepath: PathBuf,
    pub run: Runner,
    /// ops/s per sample pass, one slot per pass
    pub ops: Vec<u64>,
    pub stat: Option<OpsStat>,
}

/// Runs every test case sequentially and reports relative throughput
pub struct Harness<P> {
    config: BenchConfig,
    provider: P,
    benchmark: Box<dyn Benchmark>,
    relief: Box<dyn PressureRelief>,
    out: Box<dyn Write + Send>,
}

impl<P: TestCaseProvider> Harness<P> {
    /// Harness writing to stdout with the default warmup benchmark and no
    /// pressure relief
    pub fn new(config: BenchConfig, provider: P) -> Self {
        Self {
            config,
            provider,
            benchmark: Box::new(WarmupBenchmark),
            relief: Box::new(NoRelief),
            out: Box::new(std::io::stdout()),
        }
    }

    pub fn with_benchmark(mut self, benchmark: impl Benchmark + 'static) -> Self {
        self.benchmark = Box::new(benchmark);
        self
    }

    pub fn with_pressure_relief(mut self, relief: impl PressureRelief + 'static) -> Self {
        self.relief = Box::new(relief);
        self
    }

    pub fn with_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Resolve every source into test cases. Fails on the first source that
    /// cannot be loaded or defines a case without `run`.
    pub fn load_cases<S: AsRef<Path>>(&self, sources: &[S]) -> Result<Vec<TestCase>, LoadError> {
        let mut cases = Vec::new();
        for source in sources {
            let filepath = resolve_path(source);
            match self.provider.load(&filepath)? {
                Export::Single(case) => {
                    cases.push(self.build_case(&filepath, case, None)?);
                }
                Export::Many(defs) => {
                    for (index, case) in defs.into_iter().enumerate() {
                        cases.push(self.build_case(&filepath, case, Some(index))?);
                    }
                }
            }
        }
        debug!(count = cases.len(), "loaded test cases");
        Ok(cases)
    }

    fn build_case(
        &self,
        filepath: &Path,
        case: CaseDescriptor,
        index: Option<usize>,
    ) -> Result<TestCase, LoadError> {
        let run = case.run.ok_or_else(|| LoadError::MissingRun {
            path: filepath.to_path_buf(),
        })?;

        let title = case.title.unwrap_or_else(|| {
            let basename = filepath
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            match index {
                Some(i) => format!("{} (Case {})", basename, i + 1),
                None => basename,
            }
        });

        Ok(TestCase {
            title,
            filepath: filepath.to_path_buf(),
            run,
            ops: vec![0; self.config.sample],
            stat: None,
        })
    }

    /// Benchmark every case from `sources` and print the ranked report.
    ///
    /// Nothing is written if the config is invalid or any source fails to
    /// load. The first failing `run` aborts the whole run without a report.
    pub async fn run<S: AsRef<Path>>(&mut self, sources: &[S]) -> Result<Report, HarnessError> {
        self.config.validate()?;
        let mut cases = self.load_cases(sources)?;

        for case in &mut cases {
            self.run_case(case).await?;
        }

        let report = Report::rank(
            cases
                .into_iter()
                .filter_map(|case| {
                    let stat = case.stat?;
                    Some(ReportEntry::new(case.title, case.filepath, stat))
                })
                .collect(),
        );

        write!(self.out, "{}", report)?;
        self.out.flush()?;
        info!(cases = report.entries.len(), "benchmark complete");
        Ok(report)
    }

    async fn run_case(&mut self, case: &mut TestCase) -> Result<(), HarnessError> {
        debug!(title = %case.title, path = %case.filepath.display(), "benchmarking case");

        let mut progress = Progress::new(case.title.clone(), self.config.verbose);
        for index in 0..self.config.sample {
            progress.tick(&mut self.out)?;
            self.run_sample(case, index).await?;
            self.relief.relieve();
        }
        progress.finish(&mut self.out)?;

        if let Some(stat) = OpsStat::from_ops(&case.ops) {
            writeln!(self.out, "[summary] {}\n", stat)?;
            self.out.flush()?;
            case.stat = Some(stat);
        }

        if self.config.cooldown_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.cooldown_ms)).await;
        }
        Ok(())
    }

    async fn run_sample(&mut self, case: &mut TestCase, index: usize) -> Result<(), HarnessError> {
        if self.config.verbose {
            write!(self.out, "[{}] {}...", index + 1, case.title)?;
            self.out.flush()?;
        }

        let opts = BenchOptions {
            title: case.title.clone(),
            warmup: self.config.warmup,
            iter: self.config.iter,
        };
        let outcome = self
            .benchmark
            .measure(&case.run, &opts)
            .await
            .map_err(|source| HarnessError::Execution {
                title: case.title.clone(),
                source,
            })?;

        let ops = outcome.ops_per_second();
        case.ops[index] = ops;
        metrics::counter!("opsbench_samples_total").increment(1);
        metrics::histogram!("opsbench_sample_ops").record(ops as f64);
        trace!(title = %case.title, sample = index + 1, ops, "sample done");

        if self.config.verbose {
            writeln!(
                self.out,
                "{} iterations, took {:.2}ms, {} ops/s",
                outcome.iter, outcome.total_ms, ops
            )?;
        }
        Ok(())
    }
}
