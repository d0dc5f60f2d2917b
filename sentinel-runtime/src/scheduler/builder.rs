use super::scheduler::PeriodicScheduler;
use crate::caretaker::{Caretaker, CaretakerMetadata};
use crate::config::{resolve_duration, SchedulerSettings};
use crate::error::SchedulerError;
use config::Config;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::info;

/// Builder for a [`PeriodicScheduler`]
pub struct SchedulerBuilder {
    pub(crate) caretaker: Arc<dyn Caretaker>,
    pub(crate) caretaker_name: String,
    pub(crate) settings: SchedulerSettings,
    pub(crate) runtime: Option<Handle>,
}

impl SchedulerBuilder {
    /// Start from a caretaker with the default timings (10s initial delay, 1s rate)
    pub fn new<C>(caretaker: C) -> Self
    where
        C: Caretaker + 'static,
    {
        Self::shared(Arc::new(caretaker))
    }

    /// Start from a caretaker the caller keeps a reference to
    pub fn shared<C>(caretaker: Arc<C>) -> Self
    where
        C: Caretaker + 'static,
    {
        Self {
            caretaker,
            caretaker_name: short_type_name::<C>().to_string(),
            settings: SchedulerSettings::default(),
            runtime: None,
        }
    }

    /// Start from a `#[caretaker(...)]` annotated type.
    ///
    /// Placeholders in the annotation are resolved against `config`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sentinel_runtime::{Caretaker, CaretakerMetadata, SchedulerBuilder};
    /// use std::future::Future;
    /// use std::pin::Pin;
    ///
    /// struct Probe;
    ///
    /// impl Caretaker for Probe {
    ///     fn run(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
    ///         Box::pin(async {})
    ///     }
    /// }
    ///
    /// // Normally generated by #[caretaker(initial_delay = "...", fixed_rate = "...")]
    /// impl CaretakerMetadata for Probe {
    ///     fn initial_delay() -> &'static str { "${probe.initial_delay:5s}" }
    ///     fn fixed_rate() -> &'static str { "500ms" }
    /// }
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let builder = SchedulerBuilder::annotated(Probe, &config::Config::default())?;
    /// # let _ = builder;
    /// # Ok(())
    /// # }
    /// ```
    pub fn annotated<C>(caretaker: C, config: &Config) -> Result<Self, SchedulerError>
    where
        C: Caretaker + CaretakerMetadata + 'static,
    {
        let initial_delay = resolve_duration("initial_delay", C::initial_delay(), config)?;
        let rate = resolve_duration("fixed_rate", C::fixed_rate(), config)?;
        Ok(Self::new(caretaker).settings(SchedulerSettings { initial_delay, rate }))
    }

    /// Name used in diagnostics; defaults to the caretaker's type name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.caretaker_name = name.into();
        self
    }

    pub fn initial_delay(mut self, initial_delay: Duration) -> Self {
        self.settings.initial_delay = initial_delay;
        self
    }

    pub fn rate(mut self, rate: Duration) -> Self {
        self.settings.rate = rate;
        self
    }

    pub fn settings(mut self, settings: SchedulerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Runtime the firing loop is spawned on; defaults to the current one
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Build the scheduler (does not start it yet)
    pub fn build(self) -> Result<PeriodicScheduler, SchedulerError> {
        if self.settings.rate.is_zero() {
            return Err(SchedulerError::ZeroRate);
        }

        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?,
        };

        info!(
            caretaker = %self.caretaker_name,
            initial_delay = ?self.settings.initial_delay,
            rate = ?self.settings.rate,
            "Building periodic scheduler"
        );

        Ok(PeriodicScheduler::from_parts(
            self.caretaker,
            self.caretaker_name,
            self.settings,
            runtime,
        ))
    }
}

/// `my_app::probe::HeartbeatProbe<Foo>` -> `HeartbeatProbe`
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics.rsplit("::").next().unwrap_or(without_generics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caretaker::caretaker_fn;
    use std::future::Future;
    use std::pin::Pin;

    struct Noop;

    impl Caretaker for Noop {
        fn run(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
            Box::pin(async {})
        }
    }

    impl CaretakerMetadata for Noop {
        fn initial_delay() -> &'static str {
            "${noop.initial_delay:250ms}"
        }

        fn fixed_rate() -> &'static str {
            "2s"
        }
    }

    #[test]
    fn short_type_name_strips_path_and_generics() {
        assert_eq!(short_type_name::<Noop>(), "Noop");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
    }

    #[test]
    fn defaults_are_ten_seconds_and_one_second() {
        let builder = SchedulerBuilder::new(Noop);
        assert_eq!(builder.settings.initial_delay, Duration::from_secs(10));
        assert_eq!(builder.settings.rate, Duration::from_secs(1));
        assert_eq!(builder.caretaker_name, "Noop");
    }

    #[test]
    fn annotated_resolves_metadata_against_config() {
        let builder = SchedulerBuilder::annotated(Noop, &Config::default()).unwrap();
        assert_eq!(builder.settings.initial_delay, Duration::from_millis(250));
        assert_eq!(builder.settings.rate, Duration::from_secs(2));
    }

    #[test]
    fn build_without_runtime_fails() {
        let err = SchedulerBuilder::new(Noop).build().unwrap_err();
        assert!(matches!(err, SchedulerError::NoRuntime));
    }

    #[tokio::test]
    async fn build_rejects_zero_rate() {
        let err = SchedulerBuilder::new(caretaker_fn(|| async {}))
            .rate(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, SchedulerError::ZeroRate));
    }

    #[tokio::test]
    async fn build_picks_up_current_runtime() {
        let scheduler = SchedulerBuilder::new(Noop).name("probe").build().unwrap();
        assert_eq!(scheduler.caretaker_name(), "probe");
        assert!(!scheduler.is_armed());
    }
}
