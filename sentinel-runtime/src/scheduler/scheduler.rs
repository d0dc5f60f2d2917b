use super::builder::SchedulerBuilder;
use super::handle::ScheduledTaskHandle;
use crate::caretaker::{Caretaker, CaretakerMetadata};
use crate::config::SchedulerSettings;
use crate::error::SchedulerError;
use config::Config;
use futures::FutureExt;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info, warn};

/// Runs a single caretaker at a fixed rate until stopped.
///
/// The scheduler is either disarmed (initial) or armed. [`start`](Self::start)
/// on an armed scheduler and [`stop`](Self::stop) on a disarmed one are no-ops
/// that only log a warning, so callers racing each other are harmless. A
/// scheduler can be started and stopped any number of times.
pub struct PeriodicScheduler {
    caretaker: Arc<dyn Caretaker>,
    caretaker_name: String,
    settings: SchedulerSettings,
    runtime: Handle,
    scheduled_task: Mutex<Option<ScheduledTaskHandle>>,
}

impl PeriodicScheduler {
    /// Scheduler with the default timings on the current tokio runtime
    pub fn new<C>(caretaker: C) -> Result<Self, SchedulerError>
    where
        C: Caretaker + 'static,
    {
        SchedulerBuilder::new(caretaker).build()
    }

    pub fn builder<C>(caretaker: C) -> SchedulerBuilder
    where
        C: Caretaker + 'static,
    {
        SchedulerBuilder::new(caretaker)
    }

    /// Scheduler timed by the caretaker's `#[caretaker(...)]` annotation
    pub fn annotated<C>(caretaker: C, config: &Config) -> Result<Self, SchedulerError>
    where
        C: Caretaker + CaretakerMetadata + 'static,
    {
        SchedulerBuilder::annotated(caretaker, config)?.build()
    }

    pub(crate) fn from_parts(
        caretaker: Arc<dyn Caretaker>,
        caretaker_name: String,
        settings: SchedulerSettings,
        runtime: Handle,
    ) -> Self {
        Self {
            caretaker,
            caretaker_name,
            settings,
            runtime,
            scheduled_task: Mutex::new(None),
        }
    }

    pub fn caretaker_name(&self) -> &str {
        &self.caretaker_name
    }

    pub fn settings(&self) -> SchedulerSettings {
        self.settings
    }

    pub fn is_armed(&self) -> bool {
        self.task_slot().is_some()
    }

    /// Arm the schedule. Returns `false` (and warns) if it was already armed.
    pub fn start(&self) -> bool {
        let mut slot = self.task_slot();
        if slot.is_some() {
            warn!(caretaker = %self.caretaker_name, "{} already scheduled.", self.caretaker_name);
            return false;
        }

        *slot = Some(self.spawn_firing_loop());
        info!(
            caretaker = %self.caretaker_name,
            initial_delay = ?self.settings.initial_delay,
            rate = ?self.settings.rate,
            "Scheduler armed"
        );
        true
    }

    /// Disarm the schedule, interrupting a firing in progress.
    /// Returns `false` (and warns) if it was already disarmed.
    pub fn stop(&self) -> bool {
        let taken = self.task_slot().take();
        match taken {
            Some(task) => {
                task.cancel();
                info!(caretaker = %self.caretaker_name, "Scheduler disarmed");
                true
            }
            None => {
                warn!(caretaker = %self.caretaker_name, "{} already stopped.", self.caretaker_name);
                false
            }
        }
    }

    fn task_slot(&self) -> MutexGuard<'_, Option<ScheduledTaskHandle>> {
        self.scheduled_task.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn_firing_loop(&self) -> ScheduledTaskHandle {
        let caretaker = Arc::clone(&self.caretaker);
        let name = self.caretaker_name.clone();
        let SchedulerSettings { initial_delay, rate } = self.settings;

        let firing_loop = self.runtime.spawn(async move {
            // Default MissedTickBehavior::Burst keeps fixed-rate timing after a slow firing
            let mut ticker = interval_at(Instant::now() + initial_delay, rate);

            loop {
                ticker.tick().await;
                debug!(caretaker = %name, "Firing caretaker");

                let firing = AssertUnwindSafe(async { caretaker.run().await }).catch_unwind();
                if firing.await.is_err() {
                    error!(caretaker = %name, "Caretaker panicked; next firing stays scheduled");
                }
            }
        });

        ScheduledTaskHandle::new(firing_loop)
    }
}

impl fmt::Debug for PeriodicScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriodicScheduler")
            .field("caretaker", &self.caretaker_name)
            .field("settings", &self.settings)
            .field("armed", &self.is_armed())
            .finish()
    }
}

impl Drop for PeriodicScheduler {
    fn drop(&mut self) {
        let slot = self.scheduled_task.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = slot.take() {
            task.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caretaker::caretaker_fn;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counting_scheduler(counter: Arc<AtomicUsize>, initial_delay: Duration, rate: Duration) -> PeriodicScheduler {
        PeriodicScheduler::builder(caretaker_fn(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }))
        .initial_delay(initial_delay)
        .rate(rate)
        .build()
        .unwrap()
    }

    #[tokio::test]
    async fn fires_at_fixed_rate_until_stopped() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = counting_scheduler(counter.clone(), Duration::ZERO, Duration::from_millis(100));

        assert!(scheduler.start());
        tokio::time::sleep(Duration::from_millis(550)).await;
        assert!(counter.load(Ordering::SeqCst) >= 5);

        assert!(scheduler.stop());
        tokio::time::sleep(Duration::from_millis(50)).await;
        let after_stop = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(counter.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn initial_delay_postpones_first_firing() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = counting_scheduler(counter.clone(), Duration::from_millis(400), Duration::from_millis(50));

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(counter.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn second_start_keeps_a_single_stream() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = counting_scheduler(counter.clone(), Duration::ZERO, Duration::from_millis(100));

        assert!(scheduler.start());
        assert!(!scheduler.start());
        assert!(scheduler.is_armed());

        // Two streams would give roughly twice as many firings
        tokio::time::sleep(Duration::from_millis(450)).await;
        let fired = counter.load(Ordering::SeqCst);
        assert!((4..=6).contains(&fired), "fired {fired} times");
        scheduler.stop();
    }

    #[tokio::test]
    async fn second_stop_is_a_no_op() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = counting_scheduler(counter, Duration::ZERO, Duration::from_millis(100));

        assert!(!scheduler.stop());
        scheduler.start();
        assert!(scheduler.stop());
        assert!(!scheduler.stop());
        assert!(!scheduler.is_armed());
    }

    #[tokio::test]
    async fn can_restart_after_stop() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = counting_scheduler(counter.clone(), Duration::ZERO, Duration::from_millis(50));

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(120)).await;
        scheduler.stop();
        tokio::time::sleep(Duration::from_millis(50)).await;
        let first_run = counter.load(Ordering::SeqCst);

        assert!(scheduler.start());
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(counter.load(Ordering::SeqCst) > first_run);
        scheduler.stop();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_starts_arm_exactly_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = Arc::new(counting_scheduler(counter, Duration::from_secs(60), Duration::from_secs(1)));

        let racers: Vec<_> = (0..16)
            .map(|_| {
                let scheduler = Arc::clone(&scheduler);
                tokio::spawn(async move { scheduler.start() })
            })
            .collect();

        let mut armed = 0;
        for racer in racers {
            if racer.await.unwrap() {
                armed += 1;
            }
        }
        assert_eq!(armed, 1);
        assert!(scheduler.stop());
    }

    #[tokio::test]
    async fn panicking_firing_does_not_cancel_schedule() {
        let counter = Arc::new(AtomicUsize::new(0));
        let firings = Arc::clone(&counter);
        let scheduler = PeriodicScheduler::builder(caretaker_fn(move || {
            let n = firings.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    panic!("first firing blows up");
                }
            }
        }))
        .initial_delay(Duration::ZERO)
        .rate(Duration::from_millis(50))
        .build()
        .unwrap();

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(220)).await;
        assert!(counter.load(Ordering::SeqCst) >= 3);
        scheduler.stop();
    }

    #[tokio::test]
    async fn dropping_armed_scheduler_stops_firing() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = counting_scheduler(counter.clone(), Duration::ZERO, Duration::from_millis(50));

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(80)).await;
        drop(scheduler);
        tokio::time::sleep(Duration::from_millis(20)).await;
        let after_drop = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), after_drop);
    }
}
