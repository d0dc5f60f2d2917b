use super::check::ConnectionSanityCheck;
use crate::caretaker::Caretaker;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

type InvalidCallback = Box<dyn Fn() + Send + Sync>;

/// Caretaker that runs a sanity check on every firing and calls `on_invalid`
/// whenever the check fails.
///
/// Pair it with a [`PeriodicScheduler`](crate::PeriodicScheduler) to get a
/// heartbeat that reconnects (or alerts) when the connection drops.
pub struct ConnectionMonitor {
    check: Arc<dyn ConnectionSanityCheck>,
    on_invalid: InvalidCallback,
    consecutive_failures: AtomicU64,
}

impl ConnectionMonitor {
    pub fn new<F>(check: Arc<dyn ConnectionSanityCheck>, on_invalid: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            check,
            on_invalid: Box::new(on_invalid),
            consecutive_failures: AtomicU64::new(0),
        }
    }

    /// Failed checks since the last successful one
    pub fn consecutive_failures(&self) -> u64 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    fn check_once(&self) {
        if self.check.is_valid() {
            let previous = self.consecutive_failures.swap(0, Ordering::Relaxed);
            if previous > 0 {
                debug!(previous_failures = previous, "Connection check recovered");
            }
            return;
        }

        let failures = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        warn!(consecutive_failures = failures, "Connection check failed");
        (self.on_invalid)();
    }
}

impl Caretaker for ConnectionMonitor {
    fn run(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move { self.check_once() })
    }
}
