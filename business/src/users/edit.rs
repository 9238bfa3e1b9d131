//! Edit-user page: navigation, form state and submit.

use std::any::Any;

use clinidesk_states::{
    Command, Compute, ComputeDeps, ComputeStage, Dep, State, Updater, assign_impl,
};
use log::{error, info};

use crate::admin_api::{self, ApiError, EditUserRequest};
use crate::users::list_compute::{UsersListCompute, start_users_fetch};
use crate::users::toggle::UserActionInput;
use crate::{AlertsState, BusinessConfig, CsrfTokenState, MSG_CSRF_MISSING, MSG_INVALID_USER_ID, Route};

/// The edit form. Prefilled from the loaded users list when the page
/// opens; otherwise the admin types into empty fields.
#[derive(Debug, Clone, Default)]
pub struct EditUserFormState {
    pub user_id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl State for EditUserFormState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSubmitState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Error {
        message: String,
    },
}

/// Command-updated cache for the submit request of the edit page.
#[derive(Debug, Clone, Default)]
pub struct EditSubmitCompute {
    pub state: EditSubmitState,
}

impl EditSubmitCompute {
    pub fn is_in_flight(&self) -> bool {
        self.state == EditSubmitState::InFlight
    }
}

impl Compute for EditSubmitCompute {
    fn deps(&self) -> ComputeDeps {
        (&[], &[])
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) -> ComputeStage {
        ComputeStage::Finished
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

impl State for EditSubmitCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Navigates to the edit page for the user in [`UserActionInput`].
///
/// A missing or zero id alerts and stays on the dashboard. Otherwise the
/// route changes and the form is prefilled from the loaded list when the
/// record is present in it.
#[derive(Debug, Default)]
pub struct OpenEditUserCommand;

impl Command for OpenEditUserCommand {
    fn run(&self, mut deps: Dep<'_>, updater: Updater) {
        let input = *deps.get_state_ref::<UserActionInput>();
        let Some(user_id) = input.valid_user_id() else {
            deps.state_mut::<AlertsState>().push(MSG_INVALID_USER_ID);
            return;
        };

        let prefill = deps
            .get_compute_ref::<UsersListCompute>()
            .users()
            .and_then(|users| users.iter().find(|u| u.id == user_id))
            .cloned();

        let form = deps.state_mut::<EditUserFormState>();
        form.user_id = Some(user_id);
        match prefill {
            Some(user) => {
                form.first_name = user.first_name;
                form.last_name = user.last_name;
                form.email = user.email;
            }
            None => {
                form.first_name.clear();
                form.last_name.clear();
                form.email.clear();
            }
        }

        updater.set(EditSubmitCompute::default());
        *deps.state_mut::<Route>() = Route::EditUser { user_id };
        info!("navigating to {}", Route::EditUser { user_id }.path());
    }
}

/// Submits the edit form as JSON with the session token attached.
#[derive(Debug, Default)]
pub struct SubmitEditUserCommand;

impl Command for SubmitEditUserCommand {
    fn run(&self, mut deps: Dep<'_>, updater: Updater) {
        let form = deps.get_state_ref::<EditUserFormState>().clone();
        let Some(user_id) = form.user_id.filter(|id| *id != 0) else {
            deps.state_mut::<AlertsState>().push(MSG_INVALID_USER_ID);
            return;
        };

        let Some(token) = deps
            .get_state_ref::<CsrfTokenState>()
            .token()
            .map(str::to_owned)
        else {
            deps.state_mut::<AlertsState>().push(MSG_CSRF_MISSING);
            return;
        };

        let dashboard_url = deps
            .get_state_ref::<BusinessConfig>()
            .dashboard_url()
            .as_str()
            .to_owned();

        updater.set(EditSubmitCompute {
            state: EditSubmitState::InFlight,
        });

        let body = EditUserRequest {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
        };
        admin_api::edit_user(&dashboard_url, &token, user_id, &body, move |result| {
            let state = match result {
                Ok(response) if response.success => {
                    info!("user {user_id} updated");
                    EditSubmitState::Succeeded
                }
                Ok(response) => {
                    info!("server declined edit of user {user_id}: {:?}", response.error);
                    EditSubmitState::Error {
                        message: response
                            .error
                            .unwrap_or_else(|| "El servidor rechazó los cambios".to_owned()),
                    }
                }
                Err(err) => {
                    match &err {
                        ApiError::Status { status } => {
                            error!("edit of user {user_id} failed with status {status}");
                        }
                        ApiError::Malformed { detail } | ApiError::Transport { detail } => {
                            error!("edit of user {user_id} failed: {detail}");
                        }
                    }
                    EditSubmitState::Error {
                        message: crate::MSG_REQUEST_FAILED.to_owned(),
                    }
                }
            };
            updater.set(EditSubmitCompute { state });
        });
    }
}

/// Leaves the edit page and re-fetches the users list so the dashboard
/// shows the server's current state.
#[derive(Debug, Default)]
pub struct ReturnToDashboardCommand;

impl Command for ReturnToDashboardCommand {
    fn run(&self, mut deps: Dep<'_>, updater: Updater) {
        *deps.state_mut::<Route>() = Route::Dashboard;
        updater.set(EditSubmitCompute::default());

        let dashboard_url = deps
            .get_state_ref::<BusinessConfig>()
            .dashboard_url()
            .as_str()
            .to_owned();
        start_users_fetch(&dashboard_url, updater);
    }
}
