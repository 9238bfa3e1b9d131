//! User-facing alert queue.
//!
//! Every failure the admin is supposed to see ends up here as one entry;
//! the UI renders the front of the queue as a blocking dialog and tests
//! inspect the queue directly. Messages are the exact Spanish strings the
//! product shows.

use clinidesk_states::State;
use std::any::Any;

pub const MSG_INVALID_USER_ID: &str = "Error: ID de usuario no válido";
pub const MSG_CSRF_MISSING: &str = "Error: Token CSRF no encontrado";
pub const MSG_TOGGLE_FAILED: &str = "Error al cambiar el estado del usuario";
pub const MSG_REQUEST_FAILED: &str = "Error al procesar la solicitud";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct AlertsState {
    queue: Vec<Alert>,
}

impl AlertsState {
    pub fn push(&mut self, message: impl Into<String>) {
        self.queue.push(Alert {
            message: message.into(),
        });
    }

    /// The alert currently shown, if any. Alerts are shown in arrival order.
    pub fn current(&self) -> Option<&Alert> {
        self.queue.first()
    }

    /// Drops the alert the user just acknowledged.
    pub fn dismiss(&mut self) {
        if !self.queue.is_empty() {
            self.queue.remove(0);
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(|alert| alert.message.as_str())
    }
}

impl State for AlertsState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
