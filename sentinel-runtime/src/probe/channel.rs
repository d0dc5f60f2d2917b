use super::check::{ConnectionSanityCheck, ConnectionStatusSource};
use std::sync::Arc;

/// Sanity check that asks a [`ConnectionStatusSource`] whether the channel for
/// one fixed context is connected.
pub struct ActiveChannelCheck {
    source: Arc<dyn ConnectionStatusSource>,
    context: String,
}

impl ActiveChannelCheck {
    pub fn new(source: Arc<dyn ConnectionStatusSource>, context: impl Into<String>) -> Self {
        Self {
            source,
            context: context.into(),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

impl ConnectionSanityCheck for ActiveChannelCheck {
    fn is_valid(&self) -> bool {
        self.source.is_connected(&self.context)
    }
}
