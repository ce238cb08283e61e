//! Benchmarkable callables
//! A uniform handle over synchronous closures, deferred closures and commands

use anyhow::{anyhow, bail, Context};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

/// Future produced by a deferred runner
pub type RunFuture = BoxFuture<'static, anyhow::Result<()>>;

type SyncFn = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;
type DeferredFn = Arc<dyn Fn() -> RunFuture + Send + Sync>;

#[derive(Clone)]
enum RunnerKind {
    Sync(SyncFn),
    Deferred(DeferredFn),
}

/// Zero-argument callable measured by the harness.
///
/// Cloning is cheap: the closure is shared, not copied. An `Err` returned by
/// the callable is an execution error and aborts the whole run.
#[derive(Clone)]
pub struct Runner {
    kind: RunnerKind,
}

impl Runner {
    /// Wrap a synchronous closure
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            kind: RunnerKind::Sync(Arc::new(f)),
        }
    }

    /// Wrap a closure returning a future; each call is awaited to completion
    pub fn deferred<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            kind: RunnerKind::Deferred(Arc::new(move || f().boxed())),
        }
    }

    /// Spawn `argv[0]` with the remaining arguments once per call.
    /// A non-zero exit status is an execution error.
    pub fn command(argv: Vec<String>) -> Self {
        let argv: Arc<[String]> = argv.into();
        Self::deferred(move || {
            let argv = argv.clone();
            async move {
                let (program, args) = argv
                    .split_first()
                    .ok_or_else(|| anyhow!("empty command line"))?;

                let status = Command::new(program)
                    .args(args)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .await
                    .with_context(|| format!("failed to spawn `{}`", program))?;

                if !status.success() {
                    bail!("`{}` exited with {}", program, status);
                }
                Ok(())
            }
        })
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self.kind, RunnerKind::Deferred(_))
    }

    /// Invoke once. Synchronous closures run inline, deferred ones are awaited.
    pub async fn call(&self) -> anyhow::Result<()> {
        match &self.kind {
            RunnerKind::Sync(f) => f(),
            RunnerKind::Deferred(f) => f().await,
        }
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_deferred() { "deferred" } else { "sync" };
        f.debug_struct("Runner").field("kind", &kind).finish()
    }
}
