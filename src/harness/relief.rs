//! Memory pressure relief between sample passes

/// Hook the harness calls after every sample pass to settle allocator state
/// before the next measurement. Doing nothing is a valid implementation.
pub trait PressureRelief: Send {
    fn relieve(&mut self);
}

/// Skip relief entirely
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRelief;

impl PressureRelief for NoRelief {
    fn relieve(&mut self) {}
}

impl<F> PressureRelief for F
where
    F: FnMut() + Send,
{
    fn relieve(&mut self) {
        self()
    }
}

/// Return freed heap pages to the OS via glibc's `malloc_trim`.
/// No-op on other platforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct MallocTrim;

impl PressureRelief for MallocTrim {
    fn relieve(&mut self) {
        #[cfg(all(target_os = "linux", target_env = "gnu"))]
        unsafe {
            libc::malloc_trim(0);
        }
    }
}
