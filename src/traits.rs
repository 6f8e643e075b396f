use crate::error::MutatorResult;

/// Optional hooks a configuration type can provide to
/// [`add_with`][crate::add_with] and [`default_then_add_with`][crate::default_then_add_with].
///
/// Both methods have no-op default implementations, so an empty
/// `impl ComposableOptions for MyOptions {}` opts into neither.
pub trait ComposableOptions {
    /// Populate defaults before any mutator runs.
    fn set_defaults(&mut self) {}

    /// Check cross-field invariants after every mutator has been applied.
    /// If the value is not usable, you may return `Err` to reject it.
    fn validate(&self) -> MutatorResult {
        Ok(())
    }
}
