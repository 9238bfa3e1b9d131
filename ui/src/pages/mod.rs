//! Pages of the console, selected by the `Route` state:
//! - `dashboard_page`: statistics and the recent users table
//! - `edit_user_page`: form for one user record

mod dashboard_page;
mod edit_user_page;

pub use dashboard_page::dashboard_page;
pub use edit_user_page::edit_user_page;
