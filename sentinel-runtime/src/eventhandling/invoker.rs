use super::builder::{InvocationErrorPolicy, RegisteredHandler, SimpleEventHandlerInvokerBuilder};
use super::handler::EventHandler;
use super::segment::Segment;
use crate::error::{DispatchError, HandlerFailure, ResetError};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// Delivers events to a fixed, ordered sequence of handlers.
///
/// Handlers are called one after the other on the caller's thread, in the
/// order they were registered. The invoker holds no locks and does not queue;
/// callers delivering from several threads must serialize per segment themselves.
pub struct SimpleEventHandlerInvoker<E, R = ()> {
    handlers: Vec<RegisteredHandler<E, R>>,
    error_policy: InvocationErrorPolicy,
}

impl<E, R> SimpleEventHandlerInvoker<E, R> {
    pub fn builder() -> SimpleEventHandlerInvokerBuilder<E, R> {
        SimpleEventHandlerInvokerBuilder::new()
    }

    pub(crate) fn from_parts(handlers: Vec<RegisteredHandler<E, R>>, error_policy: InvocationErrorPolicy) -> Self {
        Self {
            handlers,
            error_policy,
        }
    }

    /// Call `handle(event)` on every handler in registration order.
    ///
    /// Under [`InvocationErrorPolicy::Propagate`] the first failure stops the
    /// sequence and is returned. The segment does not change who is called.
    pub fn handle(&self, event: &E, segment: Segment) -> Result<(), DispatchError> {
        trace!(%segment, handlers = self.handlers.len(), "Dispatching event");

        for (position, registered) in self.handlers.iter().enumerate() {
            let Err(source) = registered.handler.handle(event) else {
                continue;
            };

            let failure = HandlerFailure {
                group: registered.group.clone(),
                position,
                source,
            };
            match self.error_policy {
                InvocationErrorPolicy::Propagate => {
                    debug!(%segment, error = %failure, "Aborting dispatch after handler failure");
                    return Err(failure.into());
                }
                InvocationErrorPolicy::LogAndContinue => {
                    error!(%segment, error = %failure, "Event handler failed; continuing with next handler");
                }
            }
        }

        Ok(())
    }

    /// Broadcast `prepare_reset(payload)` to every handler, in the same order
    /// as [`handle`](Self::handle).
    ///
    /// A failing handler does not stop the broadcast; all failures are
    /// reported together once every handler has been notified.
    pub fn perform_reset(&self, payload: Option<&R>) -> Result<(), ResetError> {
        debug!(
            handlers = self.handlers.len(),
            with_payload = payload.is_some(),
            "Performing reset"
        );

        let failures: Vec<HandlerFailure> = self
            .handlers
            .iter()
            .enumerate()
            .filter_map(|(position, registered)| {
                registered
                    .handler
                    .prepare_reset(payload)
                    .err()
                    .map(|source| HandlerFailure {
                        group: registered.group.clone(),
                        position,
                        source,
                    })
            })
            .collect();

        if failures.is_empty() {
            return Ok(());
        }

        for failure in &failures {
            warn!(error = %failure, "Handler failed to prepare for reset");
        }
        Err(ResetError {
            attempted: self.handlers.len(),
            failures,
        })
    }

    /// Whether any handler can take part in a reset
    pub fn supports_reset(&self) -> bool {
        self.handlers.iter().any(|registered| registered.handler.supports_reset())
    }

    /// The flattened handler sequence, in dispatch order
    pub fn event_handlers(&self) -> impl Iterator<Item = &Arc<dyn EventHandler<E, R>>> + '_ {
        self.handlers.iter().map(|registered| &registered.handler)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Distinct processing group names, in order of first registration
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for registered in &self.handlers {
            if !groups.contains(&registered.group.as_str()) {
                groups.push(&registered.group);
            }
        }
        groups
    }
}
