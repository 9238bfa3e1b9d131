use std::any::TypeId;
use thiserror::Error;

/// Lookup failures inside a [`StateCtx`](crate::StateCtx). All of them point
/// at a missing registration, which is an app wiring bug.
#[derive(Debug, Error)]
pub enum Error {
    #[error("State not found: {id:?}, context: {context}")]
    StateNotFound { id: TypeId, context: String },
    #[error("Compute not found: {id:?}, context: {context}")]
    ComputeNotFound { id: TypeId, context: String },
    #[error("Command not found: {id:?}, context: {context}")]
    CommandNotFound { id: TypeId, context: String },
}

impl Error {
    pub fn state_not_found(id: TypeId, context: impl Into<String>) -> Self {
        Self::StateNotFound {
            id,
            context: context.into(),
        }
    }

    pub fn compute_not_found(id: TypeId, context: impl Into<String>) -> Self {
        Self::ComputeNotFound {
            id,
            context: context.into(),
        }
    }

    pub fn command_not_found(id: TypeId, context: impl Into<String>) -> Self {
        Self::CommandNotFound {
            id,
            context: context.into(),
        }
    }
}
