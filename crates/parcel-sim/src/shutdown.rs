//! Broadcast-once shutdown flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation shared by the signal handler, the bootstrap
/// retry loop, and every worker.
///
/// One writer path (`signal`), any number of readers.  Cloning shares the
/// same underlying flag.  Workers poll [`is_signaled`][Self::is_signaled]
/// once per loop iteration; nothing blocks on the flag.
#[derive(Clone, Debug, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown.  Returns `true` only for the first call, so the
    /// caller can log "shutting down" exactly once; repeat signals are
    /// no-ops.
    pub fn signal(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    #[inline]
    pub fn is_signaled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
