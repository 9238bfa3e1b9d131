/// Lifecycle of a state or compute entry across frame passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    /// Registered, not yet seen by a pass.
    #[default]
    Init,
    /// A compute ran and its async result is still outstanding.
    Pending,
    /// Value changed since the last pass; dependents must run.
    Dirty,
    /// Settled.
    Clean,
}
