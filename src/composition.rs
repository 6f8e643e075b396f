use std::borrow::Cow;

use tracing::{debug, trace};

use crate::{
    error::{BuildFailure, CompositionError},
    mutator::Mutator,
    traits::ComposableOptions,
};


/// Applies `mutators` to `options` in order, stopping at the first failure.
///
/// The failing mutator's name is recorded in the returned
/// [`CompositionError::MutatorFailure`]. Mutators that ran before it are not undone.
pub fn compose<O>(options: &mut O, mutators: &[Mutator<'_, O>]) -> Result<(), CompositionError> {
    for mutator in mutators {
        trace!("Applying mutator {}.", mutator.name());

        if let Err(source) = mutator.apply(options) {
            debug!("Mutator {} failed: {}", mutator.name(), source);

            return Err(CompositionError::MutatorFailure {
                mutator: mutator.owned_name(),
                source,
            });
        }
    }

    Ok(())
}


/// Applies `mutators` to `initial` with [`compose`], then runs `finalizer` on the result.
///
/// Pass [`Mutator::noop`] as the finalizer when there is nothing to check.
/// The finalizer sees the fully mutated value and can reject it
/// (reported as [`CompositionError::ValidationFailure`]) or fill in anything the
/// mutators left unset.
///
/// On failure the partially mutated value is handed back in the [`BuildFailure`].
pub fn build<O>(
    mut initial: O,
    finalizer: &Mutator<'_, O>,
    mutators: &[Mutator<'_, O>],
) -> Result<O, BuildFailure<O>> {
    if let Err(error) = compose(&mut initial, mutators) {
        return Err(BuildFailure::new(initial, error));
    }

    trace!("Applying finalizer {}.", finalizer.name());
    if let Err(source) = finalizer.apply(&mut initial) {
        debug!("Finalizer {} rejected the value: {}", finalizer.name(), source);

        let error = CompositionError::ValidationFailure {
            step: finalizer.owned_name(),
            source,
        };
        return Err(BuildFailure::new(initial, error));
    }

    Ok(initial)
}


/// Groups `mutators` into a single mutator that is only applied when `condition` is true.
///
/// `condition` is evaluated here, at construction. When it is false the group is dropped
/// and a [`Mutator::noop`] is returned. When it is true, applying the returned mutator
/// (named `on_condition`) composes the group, and a failure inside it surfaces as the
/// inner [`CompositionError`].
pub fn on_condition<'a, O: 'a>(condition: bool, mutators: Vec<Mutator<'a, O>>) -> Mutator<'a, O> {
    if !condition {
        return Mutator::noop();
    }

    Mutator::new("on_condition", move |options| {
        compose(options, &mutators).map_err(Into::into)
    })
}


/// Applies `mutators` with [`compose`], then calls [`ComposableOptions::validate`].
pub fn add_with<O>(options: &mut O, mutators: &[Mutator<'_, O>]) -> Result<(), CompositionError>
where
    O: ComposableOptions,
{
    compose(options, mutators)?;

    options.validate().map_err(|source| {
        debug!("Options rejected by validate: {}", source);

        CompositionError::ValidationFailure {
            step: Cow::Borrowed("validate"),
            source,
        }
    })
}


/// Calls [`ComposableOptions::set_defaults`], then behaves like [`add_with`].
pub fn default_then_add_with<O>(
    options: &mut O,
    mutators: &[Mutator<'_, O>],
) -> Result<(), CompositionError>
where
    O: ComposableOptions,
{
    options.set_defaults();
    add_with(options, mutators)
}
