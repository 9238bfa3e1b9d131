use std::any::{Any, TypeId};
use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use crate::graph::Graph;
use crate::{
    Command, Compute, ComputeStage, Dep, Error, State, StateSyncStatus, Time, Updater,
};

pub(crate) struct StateEntry {
    pub(crate) value: Box<dyn State>,
    pub(crate) status: StateSyncStatus,
}

pub(crate) struct ComputeEntry {
    pub(crate) value: Box<dyn Compute>,
    pub(crate) status: StateSyncStatus,
}

/// Owner of every registered [`State`], [`Compute`] cache and [`Command`].
///
/// The frame loop drives it twice per frame:
/// [`StateCtx::sync_computes`] before rendering (advance the clock, apply
/// queued cache updates) and [`StateCtx::run_computed`] after rendering (run
/// the computes whose dependencies changed, in dependency order).
///
/// Everything is registered once during app setup; the accessors treat a
/// missing registration as a wiring bug and panic with the exact type that
/// was asked for.
pub struct StateCtx {
    states: BTreeMap<TypeId, StateEntry>,
    computes: BTreeMap<TypeId, ComputeEntry>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,
    sender: flume::Sender<(TypeId, Box<dyn Any + Send>)>,
    receiver: flume::Receiver<(TypeId, Box<dyn Any + Send>)>,
    run_order: Option<Vec<TypeId>>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();

        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            sender,
            receiver,
            run_order: None,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let replaced = self.states.insert(
            TypeId::of::<T>(),
            StateEntry {
                value: Box::new(state),
                status: StateSyncStatus::Init,
            },
        );
        if replaced.is_some() {
            log::warn!("state {} registered twice", std::any::type_name::<T>());
        }
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let replaced = self.computes.insert(
            TypeId::of::<T>(),
            ComputeEntry {
                value: Box::new(compute),
                status: StateSyncStatus::Init,
            },
        );
        if replaced.is_some() {
            log::warn!("compute {} recorded twice", std::any::type_name::<T>());
        }
        self.run_order = None;
    }

    pub fn record_command<C: Command + 'static>(&mut self, command: C) {
        let replaced = self.commands.insert(TypeId::of::<C>(), Box::new(command));
        if replaced.is_some() {
            log::warn!("command {} recorded twice", std::any::type_name::<C>());
        }
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        let id = TypeId::of::<T>();
        self.states
            .get(&id)
            .and_then(|entry| entry.value.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(id, std::any::type_name::<T>()))
    }

    /// Shared access to a registered state.
    ///
    /// # Panics
    /// When `T` was never added.
    pub fn state<T: State>(&self) -> &T {
        match self.try_state::<T>() {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    /// Exclusive access to a registered state. The state is marked dirty so
    /// dependent computes run on the next pass.
    ///
    /// # Panics
    /// When `T` was never added.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        if let Some(entry) = self.states.get_mut(&id)
            && let Some(state) = entry.value.as_any_mut().downcast_mut::<T>()
        {
            entry.status = StateSyncStatus::Dirty;
            return state;
        }
        panic!("{}", Error::state_not_found(id, std::any::type_name::<T>()));
    }

    /// Mutates a registered state in place.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    /// Current content of the `T` cache, or `None` when it was never
    /// recorded.
    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.as_any().downcast_ref::<T>())
    }

    /// Puts the `T` cache back to its default value, e.g. when the UI that
    /// consumed a one-shot result closes.
    pub fn reset<T: Compute + Default + Send>(&mut self) {
        if let Some(entry) = self.computes.get_mut(&TypeId::of::<T>()) {
            entry.value.assign_box(Box::new(T::default()));
            entry.status = StateSyncStatus::Dirty;
        }
    }

    /// Runs the registered `C` right now, on this thread.
    ///
    /// # Panics
    /// When `C` was never recorded.
    pub fn dispatch<C: Command + 'static>(&mut self) {
        let id = TypeId::of::<C>();
        let updater = Updater::new(self.sender.clone());
        let Some(command) = self.commands.get(&id) else {
            panic!("{}", Error::command_not_found(id, std::any::type_name::<C>()));
        };
        command.run(Dep::new(&mut self.states, &mut self.computes), updater);
    }

    /// A sender for delivering values into compute caches from outside the
    /// frame loop (tests, background callbacks).
    pub fn updater(&self) -> Updater {
        Updater::new(self.sender.clone())
    }

    /// Start-of-frame pass: advance the [`Time`] clock and apply every value
    /// queued through [`Updater::set`] since the last frame.
    pub fn sync_computes(&mut self) {
        if let Some(entry) = self.states.get_mut(&TypeId::of::<Time>())
            && let Some(time) = entry.value.as_any_mut().downcast_mut::<Time>()
        {
            *time.as_mut() = Utc::now();
            entry.status = StateSyncStatus::Dirty;
        }

        while let Ok((id, boxed)) = self.receiver.try_recv() {
            match self.computes.get_mut(&id) {
                Some(entry) => {
                    entry.value.assign_box(boxed);
                    entry.status = StateSyncStatus::Dirty;
                }
                None => log::warn!("dropping update for unrecorded compute {id:?}"),
            }
        }
    }

    /// End-of-frame pass: run every compute whose dependencies changed, in
    /// dependency order, then settle the dirty flags.
    pub fn run_computed(&mut self) {
        let order = match self.run_order.take() {
            Some(order) => order,
            None => self.build_run_order(),
        };

        // What changed going into this pass. Init states count as changed so
        // first-frame computes see them.
        let mut dirty: BTreeSet<TypeId> = BTreeSet::new();
        for (id, entry) in &self.states {
            if matches!(
                entry.status,
                StateSyncStatus::Init | StateSyncStatus::Dirty
            ) {
                dirty.insert(*id);
            }
        }
        for (id, entry) in &self.computes {
            if entry.status == StateSyncStatus::Dirty {
                dirty.insert(*id);
            }
        }

        for id in &order {
            // A Pending compute is waiting for its async result; rerunning it
            // would fire the side effect again. The result arriving through
            // sync_computes marks it dirty and makes it runnable again.
            let needs_run = match self.computes.get(id) {
                Some(entry) if entry.status == StateSyncStatus::Pending => false,
                Some(entry) => {
                    entry.status == StateSyncStatus::Init || {
                        let (state_deps, compute_deps) = entry.value.deps();
                        state_deps
                            .iter()
                            .chain(compute_deps)
                            .any(|dep| dirty.contains(dep))
                    }
                }
                None => false,
            };
            if !needs_run {
                continue;
            }

            // The entry leaves the map while it runs so the compute can
            // borrow the rest of the context without aliasing itself.
            let Some(mut entry) = self.computes.remove(id) else {
                continue;
            };
            let updater = Updater::new(self.sender.clone());
            let stage = entry
                .value
                .compute(Dep::new(&mut self.states, &mut self.computes), updater);
            entry.status = match stage {
                ComputeStage::Pending => StateSyncStatus::Pending,
                ComputeStage::Finished => StateSyncStatus::Clean,
            };
            self.computes.insert(*id, entry);
        }

        self.run_order = Some(order);

        // Every dependent has now seen what was dirty.
        for entry in self.states.values_mut() {
            if matches!(
                entry.status,
                StateSyncStatus::Init | StateSyncStatus::Dirty
            ) {
                entry.status = StateSyncStatus::Clean;
            }
        }
        for entry in self.computes.values_mut() {
            if entry.status == StateSyncStatus::Dirty {
                entry.status = StateSyncStatus::Clean;
            }
        }
    }

    fn build_run_order(&self) -> Vec<TypeId> {
        let mut graph: Graph<TypeId> = Graph::with_capacity(self.computes.len());
        for (id, entry) in &self.computes {
            let (_state_deps, compute_deps) = entry.value.deps();
            for dep in compute_deps {
                graph.route_to(*dep, *id, ());
            }
        }

        let sorted = if graph.is_empty() {
            Vec::new()
        } else {
            match graph.topology_sort() {
                Ok(sorted) => sorted,
                Err(err) => {
                    log::error!("compute dependency graph is not runnable: {err}");
                    Vec::new()
                }
            }
        };

        let mut order: Vec<TypeId> = sorted
            .into_iter()
            .filter(|id| self.computes.contains_key(id))
            .collect();
        for id in self.computes.keys() {
            if !order.contains(id) {
                order.push(*id);
            }
        }
        order
    }
}
