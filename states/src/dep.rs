use std::any::TypeId;
use std::collections::BTreeMap;

use crate::ctx::{ComputeEntry, StateEntry};
use crate::{Compute, State, StateSyncStatus};

/// View over the registered states and computes, handed to a
/// [`Command`](crate::Command) or [`Compute`](crate::Compute) while it runs.
///
/// Reads borrow `self` shared, so several `get_state_ref` results can be
/// alive at once; copy what the follow-up needs out of them before calling
/// [`Dep::state_mut`].
pub struct Dep<'a> {
    states: &'a mut BTreeMap<TypeId, StateEntry>,
    computes: &'a mut BTreeMap<TypeId, ComputeEntry>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: &'a mut BTreeMap<TypeId, StateEntry>,
        computes: &'a mut BTreeMap<TypeId, ComputeEntry>,
    ) -> Self {
        Self { states, computes }
    }

    /// Shared access to a registered state. Compute caches are searched as a
    /// fallback, so command code can read either kind through one call.
    ///
    /// # Panics
    /// When `T` was never registered. Registration happens once during app
    /// setup, so a miss is a wiring bug, not a runtime condition.
    pub fn get_state_ref<T: State>(&self) -> &T {
        let id = TypeId::of::<T>();
        if let Some(entry) = self.states.get(&id)
            && let Some(state) = entry.value.as_any().downcast_ref::<T>()
        {
            return state;
        }
        if let Some(entry) = self.computes.get(&id)
            && let Some(compute) = entry.value.as_any().downcast_ref::<T>()
        {
            return compute;
        }
        panic!(
            "{}",
            crate::Error::state_not_found(id, std::any::type_name::<T>())
        );
    }

    /// Shared access to a registered compute cache.
    ///
    /// # Panics
    /// When `T` was never recorded, same policy as [`Dep::get_state_ref`].
    pub fn get_compute_ref<T: Compute>(&self) -> &T {
        let id = TypeId::of::<T>();
        if let Some(entry) = self.computes.get(&id)
            && let Some(compute) = entry.value.as_any().downcast_ref::<T>()
        {
            return compute;
        }
        panic!(
            "{}",
            crate::Error::compute_not_found(id, std::any::type_name::<T>())
        );
    }

    /// Exclusive access to a registered state, marking it dirty so dependent
    /// computes run on the next pass.
    ///
    /// # Panics
    /// When `T` was never registered, same policy as [`Dep::get_state_ref`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        if let Some(entry) = self.states.get_mut(&id)
            && let Some(state) = entry.value.as_any_mut().downcast_mut::<T>()
        {
            entry.status = StateSyncStatus::Dirty;
            return state;
        }
        panic!(
            "{}",
            crate::Error::state_not_found(id, std::any::type_name::<T>())
        );
    }
}
