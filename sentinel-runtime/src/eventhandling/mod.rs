mod handler;
mod segment;
mod builder;
mod invoker;

pub use handler::EventHandler;
pub use segment::Segment;
pub use builder::{InvocationErrorPolicy, SimpleEventHandlerInvokerBuilder};
pub use invoker::SimpleEventHandlerInvoker;
