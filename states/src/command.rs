use std::any::{Any, TypeId};

use crate::{Compute, Dep};

/// A user-triggered operation registered once and dispatched by type through
/// [`StateCtx::dispatch`](crate::StateCtx::dispatch).
///
/// Commands run synchronously on the UI thread. They read inputs through
/// [`Dep`], mutate plain states in place, and hand asynchronous results
/// (network callbacks and the like) to compute caches through the
/// [`Updater`] they captured.
pub trait Command {
    fn run(&self, deps: Dep<'_>, updater: Updater);
}

/// Cloneable sender that delivers new values into compute caches from any
/// thread.
///
/// Queued values are applied by the next
/// [`StateCtx::sync_computes`](crate::StateCtx::sync_computes) pass on the
/// UI thread, so a `set` from a background callback becomes visible one
/// frame later.
#[derive(Clone)]
pub struct Updater {
    sender: flume::Sender<(TypeId, Box<dyn Any + Send>)>,
}

impl Updater {
    pub(crate) fn new(sender: flume::Sender<(TypeId, Box<dyn Any + Send>)>) -> Self {
        Self { sender }
    }

    /// Queues `value` as the new content of the `T` cache.
    pub fn set<T: Compute + Send>(&self, value: T) {
        if self
            .sender
            .send((TypeId::of::<T>(), Box::new(value)))
            .is_err()
        {
            log::warn!(
                "updater target dropped, discarding {}",
                std::any::type_name::<T>()
            );
        }
    }
}
