use super::handler::EventHandler;
use super::invoker::SimpleEventHandlerInvoker;
use crate::error::InvokerBuildError;
use std::sync::Arc;
use tracing::info;

/// What [`SimpleEventHandlerInvoker::handle`] does when a handler fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvocationErrorPolicy {
    /// Stop at the failing handler and return its error
    #[default]
    Propagate,
    /// Log the failure and carry on with the next handler
    LogAndContinue,
}

/// A handler together with the processing group it was registered under
pub(crate) struct RegisteredHandler<E, R> {
    pub(crate) group: String,
    pub(crate) handler: Arc<dyn EventHandler<E, R>>,
}

/// Collects handlers, group by group, for a [`SimpleEventHandlerInvoker`].
///
/// Groups may be registered more than once; handlers keep the order in which
/// they were added across all registrations.
pub struct SimpleEventHandlerInvokerBuilder<E, R = ()> {
    handlers: Vec<RegisteredHandler<E, R>>,
    error_policy: InvocationErrorPolicy,
}

impl<E, R> Default for SimpleEventHandlerInvokerBuilder<E, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, R> SimpleEventHandlerInvokerBuilder<E, R> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            error_policy: InvocationErrorPolicy::default(),
        }
    }

    /// Register handlers for a processing group, in delivery order
    pub fn event_handlers<I>(mut self, group: impl Into<String>, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn EventHandler<E, R>>>,
    {
        let group = group.into();
        self.handlers.extend(handlers.into_iter().map(|handler| RegisteredHandler {
            group: group.clone(),
            handler,
        }));
        self
    }

    /// Register a single handler for a processing group
    pub fn event_handler<H>(mut self, group: impl Into<String>, handler: Arc<H>) -> Self
    where
        H: EventHandler<E, R> + 'static,
    {
        self.handlers.push(RegisteredHandler {
            group: group.into(),
            handler,
        });
        self
    }

    pub fn error_policy(mut self, error_policy: InvocationErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Build the invoker. Fails if no handler was registered in any group.
    pub fn build(self) -> Result<SimpleEventHandlerInvoker<E, R>, InvokerBuildError> {
        if self.handlers.is_empty() {
            return Err(InvokerBuildError::NoEventHandlers);
        }

        info!(
            handlers = self.handlers.len(),
            error_policy = ?self.error_policy,
            "Building event handler invoker"
        );

        Ok(SimpleEventHandlerInvoker::from_parts(self.handlers, self.error_policy))
    }
}
