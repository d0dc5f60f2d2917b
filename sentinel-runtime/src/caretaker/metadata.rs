/// Default timings attached to a caretaker type by `#[caretaker(...)]`.
///
/// Values are raw strings and may be config placeholders (`${heartbeat.rate:1s}`);
/// they are resolved when the scheduler is built.
pub trait CaretakerMetadata {
    fn initial_delay() -> &'static str;
    fn fixed_rate() -> &'static str;
}
