use std::any::Any;

use chrono::{DateTime, Utc};

use crate::State;

/// Frame clock. [`StateCtx::sync_computes`](crate::StateCtx::sync_computes)
/// moves it to `Utc::now()` at the start of every frame and marks it dirty,
/// which is what gives time-gated computes a chance to run each frame.
///
/// The stored instant is virtual: setups that never run the frame loop can
/// drive it through `AsMut`.
#[derive(Debug, Default)]
pub struct Time {
    virt: DateTime<Utc>,
}

impl State for Time {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl AsMut<DateTime<Utc>> for Time {
    fn as_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.virt
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.virt
    }
}
