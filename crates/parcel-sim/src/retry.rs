//! Fixed-delay bootstrap retry.
//!
//! The simulator starts before its dependencies in most deployments: the
//! database may not exist yet, the schema may not be seeded, the event
//! sink may still be coming up.  Bootstrap therefore retries indefinitely
//! at a fixed cadence and lets the operator (or the shutdown signal)
//! decide when to give up.

use std::fmt::Display;
use std::time::Duration;

use tracing::{debug, warn};

use crate::shutdown::ShutdownFlag;
use crate::{SimError, SimResult};

/// After this many failures, repeat attempts drop from `warn` to `debug`.
/// The condition is already known; re-warning every second is just noise.
const WARN_ATTEMPTS: u64 = 3;

/// Retry an operation every `delay` until it succeeds or shutdown is
/// signalled.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub delay: Duration,
    /// Human label for log lines ("store connection", "schema check", …).
    pub what:  &'static str,
}

impl RetryPolicy {
    pub fn new(delay: Duration, what: &'static str) -> Self {
        Self { delay, what }
    }

    /// Run `attempt` until it returns `Ok`.
    ///
    /// Never returns an error from `attempt` itself — transient failures
    /// are logged and retried forever.  The only error path is a shutdown
    /// signal arriving between attempts.
    pub fn run<T, E, F>(&self, shutdown: &ShutdownFlag, mut attempt: F) -> SimResult<T>
    where
        E: Display,
        F: FnMut() -> Result<T, E>,
    {
        let mut failures: u64 = 0;
        loop {
            if shutdown.is_signaled() {
                return Err(SimError::ShutdownDuringBootstrap { while_doing: self.what });
            }

            match attempt() {
                Ok(value) => {
                    if failures > 0 {
                        debug!(what = self.what, failures, "bootstrap step succeeded after retries");
                    }
                    return Ok(value);
                }
                Err(err) => {
                    failures += 1;
                    if failures <= WARN_ATTEMPTS {
                        warn!(what = self.what, attempt = failures, %err, "bootstrap step failed, retrying");
                    } else {
                        debug!(what = self.what, attempt = failures, %err, "bootstrap step failed, retrying");
                    }
                }
            }

            std::thread::sleep(self.delay);
        }
    }
}
