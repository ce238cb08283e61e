//! opsbench CLI
//! Benchmarks the command-line test cases listed in JSON manifests

use opsbench::{BenchConfig, Harness, ManifestProvider, MallocTrim};
use std::env;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const USAGE: &str = "usage: opsbench [--verbose] <manifest.json>...";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut verbose = false;
    let mut sources = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(ExitCode::SUCCESS);
            }
            _ => sources.push(arg),
        }
    }

    if sources.is_empty() {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::FAILURE);
    }

    let mut config = match BenchConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    config.verbose |= verbose;
    debug!(?config, "configuration loaded");

    let mut harness = Harness::new(config, ManifestProvider).with_pressure_relief(MallocTrim);

    match harness.run(&sources).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!(error = %e, "benchmark aborted");
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
