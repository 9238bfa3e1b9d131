//! Active/inactive status toggle for a user record.
//!
//! Per gesture the flow is: the table row fills [`UserActionInput`] and
//! dispatches [`RequestToggleCommand`]; a valid id opens the confirmation
//! modal ([`ToggleConfirmState`]); [`ConfirmToggleCommand`] checks the
//! session token and sends the POST; the outcome lands in
//! [`ToggleStatusCompute`] and [`ResolveToggleOutcomeCommand`] (run once
//! per frame) turns it into either the post-success reload of the users
//! list or one alert. Nothing is retried and in-flight requests are not
//! deduplicated; a second confirmed toggle may overlap the first.

use std::any::Any;

use clinidesk_states::{
    Command, Compute, ComputeDeps, ComputeStage, Dep, State, Updater, assign_impl,
};
use log::{error, info};

use crate::admin_api::{self, ApiError};
use crate::users::list_compute::start_users_fetch;
use crate::{
    AlertsState, BusinessConfig, CsrfTokenState, MSG_CSRF_MISSING, MSG_INVALID_USER_ID,
    MSG_REQUEST_FAILED, MSG_TOGGLE_FAILED,
};

pub const CONFIRM_TOGGLE_PROMPT: &str = "¿Está seguro de cambiar el estado de este usuario?";

/// Target of the next user action. The table row sets this before
/// dispatching [`RequestToggleCommand`] or
/// [`OpenEditUserCommand`](crate::OpenEditUserCommand).
///
/// `None` and `Some(0)` are both invalid: the server never allocates id 0,
/// so a zero here is the same caller bug as a missing id.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserActionInput {
    pub user_id: Option<u64>,
}

impl UserActionInput {
    pub(crate) fn valid_user_id(&self) -> Option<u64> {
        self.user_id.filter(|id| *id != 0)
    }
}

impl State for UserActionInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The confirmation dialog. `pending` holds the user whose toggle awaits
/// an answer; a new request before the answer replaces it, matching the
/// single blocking prompt of the original page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleConfirmState {
    pub pending: Option<u64>,
}

impl State for ToggleConfirmState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ToggleOutcome {
    #[default]
    Idle,
    InFlight {
        user_id: u64,
    },
    /// Server confirmed the flip; the resolve pass reloads the users list.
    Succeeded {
        user_id: u64,
    },
    /// Terminal failure with the message the user is to see.
    Failed {
        user_id: u64,
        message: String,
    },
}

/// Command-updated cache for the toggle request in flight.
#[derive(Debug, Clone, Default)]
pub struct ToggleStatusCompute {
    pub outcome: ToggleOutcome,
}

impl ToggleStatusCompute {
    pub fn is_in_flight(&self) -> bool {
        matches!(self.outcome, ToggleOutcome::InFlight { .. })
    }
}

impl Compute for ToggleStatusCompute {
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

impl State for ToggleStatusCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Opens the confirmation dialog for the user in [`UserActionInput`].
///
/// A missing or zero id alerts immediately and opens nothing.
#[derive(Debug, Default)]
pub struct RequestToggleCommand;

impl Command for RequestToggleCommand {
    fn run(&self, mut deps: Dep<'_>, _updater: Updater) {
        let input = *deps.get_state_ref::<UserActionInput>();
        let Some(user_id) = input.valid_user_id() else {
            deps.state_mut::<AlertsState>().push(MSG_INVALID_USER_ID);
            return;
        };
        deps.state_mut::<ToggleConfirmState>().pending = Some(user_id);
    }
}

/// Declined confirmation: close the dialog, send nothing.
#[derive(Debug, Default)]
pub struct CancelToggleCommand;

impl Command for CancelToggleCommand {
    fn run(&self, mut deps: Dep<'_>, _updater: Updater) {
        deps.state_mut::<ToggleConfirmState>().pending = None;
    }
}

/// Confirmed: check the session token, then send the POST.
///
/// The token check happens before any network activity; without a token
/// the gesture ends in an alert and no request. Exactly one request is
/// sent per confirmation.
#[derive(Debug, Default)]
pub struct ConfirmToggleCommand;

impl Command for ConfirmToggleCommand {
    fn run(&self, mut deps: Dep<'_>, updater: Updater) {
        let Some(user_id) = deps.get_state_ref::<ToggleConfirmState>().pending else {
            return;
        };
        deps.state_mut::<ToggleConfirmState>().pending = None;

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

        updater.set(ToggleStatusCompute {
            outcome: ToggleOutcome::InFlight { user_id },
        });

        admin_api::toggle_user_status(&dashboard_url, &token, user_id, move |result| {
            let outcome = match result {
                Ok(response) if response.success => {
                    info!("status of user {user_id} toggled, new_status={:?}", response.new_status);
                    ToggleOutcome::Succeeded { user_id }
                }
                Ok(response) => {
                    info!(
                        "server declined toggle of user {user_id}: {:?}",
                        response.error
                    );
                    ToggleOutcome::Failed {
                        user_id,
                        message: MSG_TOGGLE_FAILED.to_owned(),
                    }
                }
                Err(err) => {
                    // Status, parse and transport failures all collapse into
                    // the one generic alert; the distinction stays in the log.
                    match &err {
                        ApiError::Status { status } => {
                            error!("toggle of user {user_id} failed with status {status}");
                        }
                        ApiError::Malformed { detail } => {
                            error!("toggle of user {user_id} returned malformed body: {detail}");
                        }
                        ApiError::Transport { detail } => {
                            error!("toggle request for user {user_id} failed: {detail}");
                        }
                    }
                    ToggleOutcome::Failed {
                        user_id,
                        message: MSG_REQUEST_FAILED.to_owned(),
                    }
                }
            };
            updater.set(ToggleStatusCompute { outcome });
        });
    }
}

/// Frame pump that settles a finished toggle: success reloads the users
/// list exactly once, failure queues exactly one alert. Either way the
/// cache returns to `Idle` so the outcome is consumed once.
#[derive(Debug, Default)]
pub struct ResolveToggleOutcomeCommand;

impl Command for ResolveToggleOutcomeCommand {
    fn run(&self, mut deps: Dep<'_>, updater: Updater) {
        let outcome = deps.get_compute_ref::<ToggleStatusCompute>().outcome.clone();
        match outcome {
            ToggleOutcome::Idle | ToggleOutcome::InFlight { .. } => {}
            ToggleOutcome::Succeeded { .. } => {
                let dashboard_url = deps
                    .get_state_ref::<BusinessConfig>()
                    .dashboard_url()
                    .as_str()
                    .to_owned();
                updater.set(ToggleStatusCompute::default());
                start_users_fetch(&dashboard_url, updater);
            }
            ToggleOutcome::Failed { message, .. } => {
                deps.state_mut::<AlertsState>().push(message);
                updater.set(ToggleStatusCompute::default());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clinidesk_states::StateCtx;

    use super::*;

    fn setup_ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(UserActionInput::default());
        ctx.add_state(ToggleConfirmState::default());
        ctx.add_state(AlertsState::default());
        ctx.add_state(CsrfTokenState::default());
        ctx.add_state(BusinessConfig::new("http://127.0.0.1:9".to_owned()));
        ctx.record_compute(ToggleStatusCompute::default());
        ctx.record_command(RequestToggleCommand);
        ctx.record_command(CancelToggleCommand);
        ctx.record_command(ConfirmToggleCommand);
        ctx.record_command(ResolveToggleOutcomeCommand);
        ctx
    }

    #[test]
    fn missing_id_alerts_and_opens_nothing() {
        let mut ctx = setup_ctx();
        ctx.dispatch::<RequestToggleCommand>();

        assert_eq!(
            ctx.state::<AlertsState>().messages().collect::<Vec<_>>(),
            vec![MSG_INVALID_USER_ID]
        );
        assert_eq!(ctx.state::<ToggleConfirmState>().pending, None);
    }

    #[test]
    fn zero_id_is_invalid_too() {
        let mut ctx = setup_ctx();
        ctx.update::<UserActionInput>(|input| input.user_id = Some(0));
        ctx.dispatch::<RequestToggleCommand>();

        assert_eq!(ctx.state::<AlertsState>().len(), 1);
        assert_eq!(ctx.state::<ToggleConfirmState>().pending, None);
    }

    #[test]
    fn valid_id_opens_confirmation() {
        let mut ctx = setup_ctx();
        ctx.update::<UserActionInput>(|input| input.user_id = Some(7));
        ctx.dispatch::<RequestToggleCommand>();

        assert!(ctx.state::<AlertsState>().is_empty());
        assert_eq!(ctx.state::<ToggleConfirmState>().pending, Some(7));
    }

    #[test]
    fn second_request_replaces_pending_confirmation() {
        let mut ctx = setup_ctx();
        ctx.update::<UserActionInput>(|input| input.user_id = Some(7));
        ctx.dispatch::<RequestToggleCommand>();
        ctx.update::<UserActionInput>(|input| input.user_id = Some(8));
        ctx.dispatch::<RequestToggleCommand>();

        assert_eq!(ctx.state::<ToggleConfirmState>().pending, Some(8));
    }

    #[test]
    fn cancel_is_a_silent_noop() {
        let mut ctx = setup_ctx();
        ctx.update::<UserActionInput>(|input| input.user_id = Some(7));
        ctx.dispatch::<RequestToggleCommand>();
        ctx.dispatch::<CancelToggleCommand>();
        ctx.sync_computes();

        assert_eq!(ctx.state::<ToggleConfirmState>().pending, None);
        assert!(ctx.state::<AlertsState>().is_empty());
        assert!(!ctx
            .cached::<ToggleStatusCompute>()
            .is_some_and(ToggleStatusCompute::is_in_flight));
    }

    #[test]
    fn confirm_without_token_alerts_and_sends_nothing() {
        let mut ctx = setup_ctx();
        ctx.update::<UserActionInput>(|input| input.user_id = Some(7));
        ctx.dispatch::<RequestToggleCommand>();
        ctx.dispatch::<ConfirmToggleCommand>();
        ctx.sync_computes();

        assert_eq!(
            ctx.state::<AlertsState>().messages().collect::<Vec<_>>(),
            vec![MSG_CSRF_MISSING]
        );
        assert_eq!(ctx.state::<ToggleConfirmState>().pending, None);
        assert_eq!(
            ctx.cached::<ToggleStatusCompute>().map(|c| c.outcome.clone()),
            Some(ToggleOutcome::Idle),
            "no request may start without a token"
        );
    }

    #[test]
    fn confirm_without_pending_is_a_noop() {
        let mut ctx = setup_ctx();
        ctx.dispatch::<ConfirmToggleCommand>();

        assert!(ctx.state::<AlertsState>().is_empty());
    }

    #[test]
    fn failed_outcome_resolves_into_one_alert() {
        let mut ctx = setup_ctx();
        ctx.updater().set(ToggleStatusCompute {
            outcome: ToggleOutcome::Failed {
                user_id: 7,
                message: MSG_REQUEST_FAILED.to_owned(),
            },
        });
        ctx.sync_computes();

        ctx.dispatch::<ResolveToggleOutcomeCommand>();
        ctx.sync_computes();
        ctx.dispatch::<ResolveToggleOutcomeCommand>();
        ctx.sync_computes();

        assert_eq!(
            ctx.state::<AlertsState>().messages().collect::<Vec<_>>(),
            vec![MSG_REQUEST_FAILED],
            "an outcome is consumed exactly once"
        );
        assert_eq!(
            ctx.cached::<ToggleStatusCompute>().map(|c| c.outcome.clone()),
            Some(ToggleOutcome::Idle)
        );
    }
}
