//! Session anti-forgery token.
//!
//! The server issues a CSRF token with the admin session; every
//! state-changing request echoes it back through the `X-CSRFToken` header.
//! The token may legitimately be absent (expired session, first load before
//! the session handshake), and commands must treat that as a terminal
//! validation error for the gesture, never as something to retry.

use clinidesk_states::State;
use std::any::Any;

#[derive(Debug, Clone, Default)]
pub struct CsrfTokenState {
    token: Option<String>,
}

impl CsrfTokenState {
    pub fn with_token(token: impl Into<String>) -> Self {
        let mut state = Self::default();
        state.set(Some(token.into()));
        state
    }

    /// Stores a new token. Blank strings count as "no token".
    pub fn set(&mut self, token: Option<String>) {
        self.token = token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned);
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl State for CsrfTokenState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
