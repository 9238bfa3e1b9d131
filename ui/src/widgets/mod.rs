pub mod api_status;
mod env_version;
mod modals;
mod stat_cards;
mod users_panel;

pub use api_status::api_status;
pub use env_version::env_version;
pub use modals::{alert_modal, confirm_toggle_modal};
pub use stat_cards::stat_cards;
pub use users_panel::users_panel;
