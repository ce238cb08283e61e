//! Timed execution wrappers
//! Single-shot timing for synchronous and deferred closures

use std::future::Future;
use tracing::trace;

use crate::clock;

/// A closure's result paired with its elapsed time in milliseconds
pub type TimingResult<T> = (T, f64);

/// Call `f` once, returning its result and the elapsed milliseconds.
pub fn timed_result<T, F>(f: F) -> TimingResult<T>
where
    F: FnOnce() -> T,
{
    let t0 = clock::now();
    let res = f();
    let elapsed = clock::now().ms_since(t0);
    trace!(elapsed_ms = elapsed, "timed sync call");
    (res, elapsed)
}

/// Deferred counterpart of [`timed_result`]. The clock stops once the
/// future returned by `f` resolves.
pub async fn timed_result_async<T, F, Fut>(f: F) -> TimingResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let t0 = clock::now();
    let res = f().await;
    let elapsed = clock::now().ms_since(t0);
    trace!(elapsed_ms = elapsed, "timed deferred call");
    (res, elapsed)
}

/// Call `f` once, print `"{label} {elapsed}ms"` and return `f`'s result.
pub fn timed<T, F>(f: F, label: &str) -> T
where
    F: FnOnce() -> T,
{
    let (res, t) = timed_result(f);
    println!("{}", format_elapsed(label, t));
    res
}

/// Deferred counterpart of [`timed`].
pub async fn timed_async<T, F, Fut>(f: F, label: &str) -> T
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let (res, t) = timed_result_async(f).await;
    println!("{}", format_elapsed(label, t));
    res
}

/// Output line shared by the printing wrappers. Always two decimals.
pub(crate) fn format_elapsed(label: &str, elapsed_ms: f64) -> String {
    format!("{} {:.2}ms", label, elapsed_ms)
}
