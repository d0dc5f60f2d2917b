use thiserror::Error;

/// Error returned by an [`EventHandler`](crate::EventHandler) callback
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building a [`PeriodicScheduler`](crate::PeriodicScheduler)
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Fixed rate must be greater than zero")]
    ZeroRate,

    #[error("No tokio runtime available; call from within a runtime or supply a handle")]
    NoRuntime,

    #[error("Invalid duration for {key}: '{value}'")]
    InvalidDuration { key: String, value: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Errors raised while building a [`SimpleEventHandlerInvoker`](crate::SimpleEventHandlerInvoker)
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvokerBuildError {
    #[error("At least one event handler must be registered")]
    NoEventHandlers,
}

/// A single handler failure, tagged with where the handler sits in the dispatch order
#[derive(Error, Debug)]
#[error("handler #{position} of processing group '{group}' failed: {source}")]
pub struct HandlerFailure {
    pub group: String,
    pub position: usize,
    #[source]
    pub source: HandlerError,
}

/// Errors surfaced by [`SimpleEventHandlerInvoker::handle`](crate::SimpleEventHandlerInvoker::handle)
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Event dispatch aborted: {0}")]
    HandlerFailed(#[from] HandlerFailure),
}

/// Failures collected while broadcasting a reset.
///
/// Every handler has been notified by the time this is returned.
#[derive(Error, Debug)]
#[error("{} of {attempted} handlers failed to prepare for reset", .failures.len())]
pub struct ResetError {
    pub attempted: usize,
    pub failures: Vec<HandlerFailure>,
}
