//! Batched timing
//! Amortizes per-call measurement overhead over `n` sequential invocations

use std::future::Future;
use std::hint::black_box;

use crate::timed::{format_elapsed, timed_result, timed_result_async, TimingResult};

/// Iteration count used when callers have no better figure
pub const DEFAULT_ITERATIONS: u64 = 1_000_000;

/// Call `f` `n` times back to back and time the whole loop.
///
/// Only the last result is kept; it is `None` when `n == 0`.
pub fn bench_result<T, F>(mut f: F, n: u64) -> TimingResult<Option<T>>
where
    F: FnMut() -> T,
{
    timed_result(|| {
        let mut res = None;
        for _ in 0..n {
            res = Some(black_box(f()));
        }
        res
    })
}

/// Deferred counterpart of [`bench_result`]. Each future is awaited before
/// the next invocation starts; invocations never overlap.
pub async fn bench_result_async<T, F, Fut>(mut f: F, n: u64) -> TimingResult<Option<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = T>,
{
    timed_result_async(|| async move {
        let mut res = None;
        for _ in 0..n {
            res = Some(f().await);
        }
        res
    })
    .await
}

/// Like [`bench_result_async`] but stops at the first `Err`, which is
/// returned in place of the timing.
pub async fn try_bench_result_async<T, E, F, Fut>(
    mut f: F,
    n: u64,
) -> Result<TimingResult<Option<T>>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let (res, elapsed) = timed_result_async(|| async move {
        let mut res = None;
        for _ in 0..n {
            res = Some(f().await?);
        }
        Ok::<_, E>(res)
    })
    .await;

    Ok((res?, elapsed))
}

/// Printing counterpart of [`bench_result`]: emits `"{label} {total}ms"`
/// and returns the last result.
pub fn bench<T, F>(f: F, n: u64, label: &str) -> Option<T>
where
    F: FnMut() -> T,
{
    let (res, t) = bench_result(f, n);
    println!("{}", format_elapsed(label, t));
    res
}

/// Deferred counterpart of [`bench`].
pub async fn bench_async<T, F, Fut>(f: F, n: u64, label: &str) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = T>,
{
    let (res, t) = bench_result_async(f, n).await;
    println!("{}", format_elapsed(label, t));
    res
}
