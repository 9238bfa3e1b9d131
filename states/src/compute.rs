use std::any::{Any, TypeId};

use crate::{Dep, State, Updater};

/// Dependencies of a compute: `(state type ids, compute type ids)`.
///
/// Declared as `'static` slices so implementations can build them in `const`
/// position with [`TypeId::of`].
pub type ComputeDeps = (&'static [TypeId], &'static [TypeId]);

/// What a single `compute` run left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeStage {
    /// Work was started; the result arrives later through the updater. The
    /// compute is not run again until that result lands, so a `Pending`
    /// compute must always deliver a value eventually, on error paths too.
    Pending,
    /// Nothing outstanding for the current inputs.
    Finished,
}

/// A cache derived from states and other computes.
///
/// Two flavors share this trait:
///
/// - Derived caches implement [`Compute::compute`] and run whenever one of
///   their [`Compute::deps`] is dirty, delivering the new value through
///   [`Updater::set`]. A compute that performs IO must gate it itself
///   (`compute` runs implicitly, potentially every frame).
/// - Command-updated caches keep `compute` a no-op and are written only by
///   [`Command`](crate::Command)s, again through [`Updater::set`].
///
/// Values land in the cache when
/// [`StateCtx::sync_computes`](crate::StateCtx::sync_computes) applies the
/// queue via [`Compute::assign_box`].
pub trait Compute: State {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater) -> ComputeStage;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replaces `dest` with the downcast payload, logging instead of panicking
/// when the payload type does not match.
pub fn assign_impl<T: Compute>(dest: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(new_self) => *dest = *new_self,
        Err(_) => log::error!(
            "assign_box: payload is not a {}",
            std::any::type_name::<T>()
        ),
    }
}
