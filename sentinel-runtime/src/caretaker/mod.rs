mod r#trait;
mod metadata;
mod function;

pub use r#trait::Caretaker;
pub use metadata::CaretakerMetadata;
pub use function::{caretaker_fn, FnCaretaker};
