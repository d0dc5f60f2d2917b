//! Sentinel Runtime - caretaker scheduling and ordered event dispatch
//!
//! This crate provides the runtime pieces behind `sentinel`: a fixed-rate
//! scheduler with idempotent start/stop, a connection sanity probe, and an
//! invoker that fans events out to handlers in registration order.

mod caretaker;
mod config;
mod error;
mod eventhandling;
mod probe;
mod scheduler;
mod time_unit;

// Re-export public API
pub use caretaker::{caretaker_fn, Caretaker, CaretakerMetadata, FnCaretaker};
pub use crate::config::{
    load_toml_config, load_yaml_config, resolve_config_value, resolve_duration, SchedulerSettings,
    DEFAULT_INITIAL_DELAY, DEFAULT_RATE,
};
pub use error::{
    DispatchError, HandlerError, HandlerFailure, InvokerBuildError, ResetError, SchedulerError,
};
pub use eventhandling::{
    EventHandler, InvocationErrorPolicy, Segment, SimpleEventHandlerInvoker,
    SimpleEventHandlerInvokerBuilder,
};
pub use probe::{ActiveChannelCheck, ConnectionMonitor, ConnectionSanityCheck, ConnectionStatusSource};
pub use scheduler::{PeriodicScheduler, SchedulerBuilder};
pub use time_unit::TimeUnit;
