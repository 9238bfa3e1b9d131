//! Recent-users list cache and its refresh command.

use std::any::Any;

use chrono::{DateTime, Utc};
use clinidesk_states::{
    Command, Compute, ComputeDeps, ComputeStage, Dep, State, Updater, assign_impl,
};
use log::{debug, warn};

use crate::admin_api::{self, AdminUser};
use crate::{ApiError, BusinessConfig};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum UsersListState {
    /// Never fetched.
    #[default]
    Idle,
    /// A fetch is in flight; previous content is gone until it lands.
    Loading,
    Loaded {
        users: Vec<AdminUser>,
        at: DateTime<Utc>,
    },
    Error {
        message: String,
    },
}

/// Command-updated cache of `GET /admin-dashboard/users/`.
///
/// Filled by [`RefreshUsersCommand`] and re-filled by the reload that
/// follows a successful status toggle.
#[derive(Debug, Clone, Default)]
pub struct UsersListCompute {
    pub state: UsersListState,
}

impl UsersListCompute {
    pub fn users(&self) -> Option<&[AdminUser]> {
        match &self.state {
            UsersListState::Loaded { users, .. } => Some(users),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, UsersListState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            UsersListState::Error { message } => Some(message),
            _ => None,
        }
    }
}

impl Compute for UsersListCompute {
    fn deps(&self) -> ComputeDeps {
        // Updated by commands only.
        (&[], &[])
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) -> ComputeStage {
        ComputeStage::Finished
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

impl State for UsersListCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Starts one fetch of the users list and wires its outcome into the cache.
///
/// Shared by the explicit refresh gesture and the post-toggle reload, so
/// both produce exactly one request.
pub(crate) fn start_users_fetch(dashboard_url: &str, updater: Updater) {
    updater.set(UsersListCompute {
        state: UsersListState::Loading,
    });

    admin_api::fetch_users(dashboard_url, move |result| match result {
        Ok(response) => {
            debug!("users list loaded: {} users", response.users.len());
            updater.set(UsersListCompute {
                state: UsersListState::Loaded {
                    users: response.users,
                    at: Utc::now(),
                },
            });
        }
        Err(err) => {
            warn!("users list fetch failed: {err}");
            let message = match err {
                ApiError::Status { status } => format!("Status code: {status}"),
                ApiError::Malformed { .. } | ApiError::Transport { .. } => err.to_string(),
            };
            updater.set(UsersListCompute {
                state: UsersListState::Error { message },
            });
        }
    });
}

/// Refreshes the recent-users table.
#[derive(Debug, Default)]
pub struct RefreshUsersCommand;

impl Command for RefreshUsersCommand {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        let config = deps.get_state_ref::<BusinessConfig>();
        start_users_fetch(config.dashboard_url().as_str(), updater);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_the_lifecycle() {
        let cache = UsersListCompute::default();
        assert!(cache.users().is_none());
        assert!(!cache.is_loading());
        assert!(cache.error().is_none());

        let loading = UsersListCompute {
            state: UsersListState::Loading,
        };
        assert!(loading.is_loading());

        let failed = UsersListCompute {
            state: UsersListState::Error {
                message: "Status code: 502".to_owned(),
            },
        };
        assert_eq!(failed.error(), Some("Status code: 502"));
    }
}
