use std::future::Future;
use std::pin::Pin;

/// The recurring action driven by a [`PeriodicScheduler`](crate::PeriodicScheduler).
///
/// Implement this on a struct holding whatever the action needs. Use the
/// `#[caretaker]` attribute on the impl block to attach default timings.
///
/// # Example
///
/// ```rust
/// use sentinel_runtime::Caretaker;
/// use std::future::Future;
/// use std::pin::Pin;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// struct PingCounter {
///     pings: AtomicU64,
/// }
///
/// impl Caretaker for PingCounter {
///     fn run(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
///         Box::pin(async move {
///             self.pings.fetch_add(1, Ordering::Relaxed);
///         })
///     }
/// }
/// ```
pub trait Caretaker: Send + Sync {
    /// Perform one firing
    fn run(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}
