//! Route state for page navigation.

use clinidesk_states::State;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Current page of the console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Admin dashboard with statistics and the recent users table.
    #[default]
    Dashboard,
    /// Edit form for a single user record.
    EditUser { user_id: u64 },
}

impl State for Route {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Route {
    /// Canonical path of the route, matching the server-side URL scheme.
    pub fn path(&self) -> String {
        match self {
            Self::Dashboard => "/admin-dashboard/".to_owned(),
            Self::EditUser { user_id } => format!("/admin/users/edit/{user_id}/"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_route_is_dashboard() {
        assert_eq!(Route::default(), Route::Dashboard);
    }

    #[test]
    fn edit_path_interpolates_id() {
        let route = Route::EditUser { user_id: 42 };
        assert_eq!(route.path(), "/admin/users/edit/42/");
    }

    #[test]
    fn dashboard_path() {
        assert_eq!(Route::Dashboard.path(), "/admin-dashboard/");
    }
}
