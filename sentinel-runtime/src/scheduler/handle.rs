use tokio::task::JoinHandle;

/// Handle to a live firing loop.
///
/// Only a [`PeriodicScheduler`](super::PeriodicScheduler) creates these, and it
/// keeps at most one at a time.
#[derive(Debug)]
pub(crate) struct ScheduledTaskHandle {
    pub(crate) firing_loop: JoinHandle<()>,
}

impl ScheduledTaskHandle {
    pub(crate) fn new(firing_loop: JoinHandle<()>) -> Self {
        Self { firing_loop }
    }

    /// Abort the loop. An in-flight firing is interrupted at its next await point.
    pub(crate) fn cancel(self) {
        self.firing_loop.abort();
    }
}
