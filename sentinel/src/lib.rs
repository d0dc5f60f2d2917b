//! # Sentinel - caretaker scheduling and ordered event dispatch
//!
//! Two small building blocks for event-driven services:
//!
//! - **[`PeriodicScheduler`]**: runs one caretaker (a heartbeat, a connection
//!   probe, a cleanup) at a fixed rate after an initial delay. `start()` and
//!   `stop()` are idempotent and safe to race; redundant calls only log a warning.
//! - **[`SimpleEventHandlerInvoker`]**: delivers each event to every registered
//!   handler in registration order and broadcasts resets to all of them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sentinel::{caretaker, Caretaker, PeriodicScheduler};
//! use std::future::Future;
//! use std::pin::Pin;
//!
//! struct Heartbeat;
//!
//! #[caretaker(initial_delay = "1s", fixed_rate = "${heartbeat.rate:500ms}")]
//! impl Caretaker for Heartbeat {
//!     fn run(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
//!         Box::pin(async move {
//!             println!("still alive");
//!         })
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = sentinel::load_toml_config("config/application.toml")?;
//!     let scheduler = PeriodicScheduler::annotated(Heartbeat, &config)?;
//!     scheduler.start();
//!
//!     tokio::signal::ctrl_c().await?;
//!     scheduler.stop();
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! `config/application.toml`:
//!
//! ```toml
//! [heartbeat]
//! initial_delay = "10s"
//! rate = "1s"
//! ```
//!
//! Read it with [`SchedulerSettings::from_config`], or reference keys from a
//! `#[caretaker]` annotation with `${heartbeat.rate}` / `${heartbeat.rate:1s}`.
//! Environment variables with the `APP_` prefix override file values; nested
//! keys use a double underscore (`APP_HEARTBEAT__INITIAL_DELAY=0`).

// Re-export macros
pub use sentinel_macro::caretaker;

// Re-export core types
pub use sentinel_runtime::{
    caretaker_fn, load_toml_config, load_yaml_config, ActiveChannelCheck, Caretaker,
    CaretakerMetadata, ConnectionMonitor, ConnectionSanityCheck, ConnectionStatusSource,
    DispatchError, EventHandler, HandlerError, HandlerFailure, InvocationErrorPolicy,
    InvokerBuildError, PeriodicScheduler, ResetError, SchedulerBuilder, SchedulerError,
    SchedulerSettings, Segment, SimpleEventHandlerInvoker, TimeUnit,
};

// Make sentinel_runtime available for macro expansion
pub use sentinel_runtime;

// Re-export the configuration type callers pass to `annotated`
pub use config::Config;
