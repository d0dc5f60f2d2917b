/// Answers "is the connection usable right now?"
pub trait ConnectionSanityCheck: Send + Sync {
    fn is_valid(&self) -> bool;
}

/// Connection status owned by whatever manages the actual connections.
///
/// An unreachable source should answer `false` rather than fail.
pub trait ConnectionStatusSource: Send + Sync {
    fn is_connected(&self, context: &str) -> bool;
}

impl<F> ConnectionSanityCheck for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_valid(&self) -> bool {
        self()
    }
}
