use std::{borrow::Cow, fmt};

use crate::error::MutatorResult;


/// One named configuration change.
///
/// A mutator pairs a human-readable name with a function that receives the
/// in-progress configuration value by mutable reference. The name is what
/// [`CompositionError`][crate::CompositionError] reports when the function fails,
/// so constructors should use the name the caller knows them by (e.g. `with_port`).
///
/// The `'a` lifetime allows the function to borrow state owned by the caller.
pub struct Mutator<'a, O> {
    name: Cow<'static, str>,

    function: Box<dyn Fn(&mut O) -> MutatorResult + 'a>,
}

impl<'a, O> Mutator<'a, O> {
    pub fn new<N, F>(name: N, function: F) -> Self
    where
        N: Into<Cow<'static, str>>,
        F: Fn(&mut O) -> MutatorResult + 'a,
    {
        Self {
            name: name.into(),
            function: Box::new(function),
        }
    }

    /// A mutator that always succeeds and never touches the value.
    pub fn noop() -> Self {
        Self::new("noop", |_| Ok(()))
    }

    /// Wraps a change that cannot fail.
    pub fn infallible<N, F>(name: N, function: F) -> Self
    where
        N: Into<Cow<'static, str>>,
        F: Fn(&mut O) + 'a,
    {
        Self::new(name, move |options| {
            function(options);
            Ok(())
        })
    }

    /// Returns `mutator` if `condition` holds, [`Mutator::noop`] otherwise.
    ///
    /// Like [`on_condition`][crate::on_condition], `condition` is evaluated now,
    /// not when the mutator is applied.
    pub fn when(condition: bool, mutator: Self) -> Self {
        if condition {
            mutator
        } else {
            Self::noop()
        }
    }

    /// Builds a mutator from `input` using `constructor`, or [`Mutator::noop`]
    /// when there is no input.
    ///
    /// Useful for turning optional arguments (e.g. from a command line)
    /// into a fixed-length list of mutators.
    pub fn when_some<T, C>(input: Option<T>, constructor: C) -> Self
    where
        C: FnOnce(T) -> Self,
    {
        input.map(constructor).unwrap_or_else(Self::noop)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn owned_name(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    /// Applies the change to `options`.
    pub fn apply(&self, options: &mut O) -> MutatorResult {
        (self.function)(options)
    }
}

impl<O> fmt::Debug for Mutator<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
