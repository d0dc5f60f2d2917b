mod check;
mod channel;
mod monitor;

pub use check::{ConnectionSanityCheck, ConnectionStatusSource};
pub use channel::ActiveChannelCheck;
pub use monitor::ConnectionMonitor;
