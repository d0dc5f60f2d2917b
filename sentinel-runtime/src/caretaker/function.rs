use super::r#trait::Caretaker;
use std::future::Future;
use std::pin::Pin;

/// A caretaker backed by a closure returning a future
pub struct FnCaretaker<F> {
    f: F,
}

/// Wrap an async closure as a [`Caretaker`].
///
/// ```rust
/// use sentinel_runtime::caretaker_fn;
///
/// let caretaker = caretaker_fn(|| async {
///     // poll something
/// });
/// # let _ = caretaker;
/// ```
pub fn caretaker_fn<F, Fut>(f: F) -> FnCaretaker<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
{
    FnCaretaker { f }
}

impl<F, Fut> Caretaker for FnCaretaker<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
{
    fn run(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin((self.f)())
    }
}
