//! User-management operations of the admin dashboard.
//!
//! Each operation follows the same shape: an input state the UI fills in,
//! a command carrying the gesture (and its network IO), and a compute
//! cache holding the asynchronous outcome.

pub mod edit;
pub mod list_compute;
pub mod stats_compute;
pub mod toggle;
