//! Monotonic high-resolution clock
//! Nanosecond timestamps relative to a process-wide anchor

use std::sync::OnceLock;
use std::time::Instant;

static ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Nanoseconds elapsed since the first clock read in this process.
///
/// Monotonic within one process lifetime; comparing timestamps taken in
/// different processes is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Raw nanosecond value
    #[inline(always)]
    pub fn as_nanos(self) -> u64 {
        self.0
    }

    /// Milliseconds between `earlier` and `self`, zero if `earlier` is later
    #[inline(always)]
    pub fn ms_since(self, earlier: Timestamp) -> f64 {
        self.0.saturating_sub(earlier.0) as f64 * 1e-6
    }
}

/// Read the clock
#[inline(always)]
pub fn now() -> Timestamp {
    let anchor = ANCHOR.get_or_init(Instant::now);
    Timestamp(anchor.elapsed().as_nanos() as u64)
}
