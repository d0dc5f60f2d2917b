use crate::error::HandlerError;

/// A component that reacts to events of type `E` and can be told to prepare
/// for a reset carrying an optional context of type `R`.
pub trait EventHandler<E, R = ()>: Send + Sync {
    fn handle(&self, event: &E) -> Result<(), HandlerError>;

    /// `None` means the reset was triggered without any context, which is
    /// distinct from any payload value (an empty one included).
    fn prepare_reset(&self, payload: Option<&R>) -> Result<(), HandlerError>;

    fn supports_reset(&self) -> bool {
        true
    }
}
