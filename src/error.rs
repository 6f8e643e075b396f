use std::{borrow::Cow, error::Error as StdError, fmt};

use miette::Diagnostic;
use thiserror::Error;


/// The error type a [`Mutator`][crate::Mutator] may fail with.
///
/// Any `std::error::Error + Send + Sync` converts into this with `?` or `.into()`,
/// and the original value can be recovered with `downcast_ref`.
pub type MutatorError = Box<dyn StdError + Send + Sync + 'static>;

/// The result of applying a single [`Mutator`][crate::Mutator].
pub type MutatorResult = Result<(), MutatorError>;


/// Why a composition stopped.
#[derive(Debug, Error, Diagnostic)]
pub enum CompositionError {
    /// A mutator returned an error. No mutator after it was applied.
    #[error("cannot apply {mutator}")]
    #[diagnostic(
        code(with::mutator_failure),
        help("mutators before this one were already applied; the value was not rolled back")
    )]
    MutatorFailure {
        mutator: Cow<'static, str>,
        source: MutatorError,
    },

    /// Every mutator succeeded, but the finalizer or the
    /// [`validate`][crate::ComposableOptions::validate] hook rejected the result.
    #[error("validation failed in {step}")]
    #[diagnostic(code(with::validation_failure))]
    ValidationFailure {
        step: Cow<'static, str>,
        source: MutatorError,
    },
}

impl CompositionError {
    /// Name of the mutator or validation step that failed.
    pub fn step(&self) -> &str {
        match self {
            Self::MutatorFailure { mutator, .. } => mutator,
            Self::ValidationFailure { step, .. } => step,
        }
    }

    /// The error the failing step returned, before it was wrapped.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        match self {
            Self::MutatorFailure { source, .. } | Self::ValidationFailure { source, .. } => &**source,
        }
    }

    pub fn is_mutator_failure(&self) -> bool {
        matches!(self, Self::MutatorFailure { .. })
    }

    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::ValidationFailure { .. })
    }
}


/// A failed [`build`][crate::build], carrying the partially mutated value
/// alongside the error that stopped it.
///
/// Formats and chains exactly like the contained [`CompositionError`].
/// Use `?` to convert into [`CompositionError`] when the value is of no interest.
#[derive(Debug)]
pub struct BuildFailure<O> {
    value: O,
    error: CompositionError,
}

impl<O> BuildFailure<O> {
    pub(crate) fn new(value: O, error: CompositionError) -> Self {
        Self { value, error }
    }

    /// The value as it was when composition stopped.
    pub fn value(&self) -> &O {
        &self.value
    }

    pub fn error(&self) -> &CompositionError {
        &self.error
    }

    pub fn into_parts(self) -> (O, CompositionError) {
        (self.value, self.error)
    }

    pub fn into_error(self) -> CompositionError {
        self.error
    }
}

impl<O> fmt::Display for BuildFailure<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<O: fmt::Debug> StdError for BuildFailure<O> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.error.source()
    }
}

impl<O> From<BuildFailure<O>> for CompositionError {
    fn from(failure: BuildFailure<O>) -> Self {
        failure.error
    }
}
