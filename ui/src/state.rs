use clinidesk_business::{
    AlertsState, ApiStatus, BusinessConfig, CancelToggleCommand, ConfirmToggleCommand,
    CsrfTokenState, DashboardStatsCompute, EditSubmitCompute, EditUserFormState,
    OpenEditUserCommand, RefreshUsersCommand, RequestToggleCommand, ResolveToggleOutcomeCommand,
    ReturnToDashboardCommand, Route, SubmitEditUserCommand, ToggleConfirmState,
    ToggleStatusCompute, UserActionInput, UsersListCompute,
};
use clinidesk_states::{StateCtx, Time};

/// The main application state: one [`StateCtx`] with every business state,
/// cache and command registered.
pub struct State {
    pub ctx: StateCtx,
}

fn register(mut ctx: StateCtx) -> StateCtx {
    ctx.add_state(Time::default());
    ctx.add_state(AlertsState::default());
    ctx.add_state(CsrfTokenState::default());
    ctx.add_state(Route::default());
    ctx.add_state(UserActionInput::default());
    ctx.add_state(ToggleConfirmState::default());
    ctx.add_state(EditUserFormState::default());

    ctx.record_compute(ApiStatus::default());
    ctx.record_compute(UsersListCompute::default());
    ctx.record_compute(DashboardStatsCompute::default());
    ctx.record_compute(ToggleStatusCompute::default());
    ctx.record_compute(EditSubmitCompute::default());

    ctx.record_command(RefreshUsersCommand);
    ctx.record_command(RequestToggleCommand);
    ctx.record_command(CancelToggleCommand);
    ctx.record_command(ConfirmToggleCommand);
    ctx.record_command(ResolveToggleOutcomeCommand);
    ctx.record_command(OpenEditUserCommand);
    ctx.record_command(SubmitEditUserCommand);
    ctx.record_command(ReturnToDashboardCommand);
    ctx
}

impl Default for State {
    fn default() -> Self {
        let mut ctx = StateCtx::new();
        ctx.add_state(BusinessConfig::default());
        Self {
            ctx: register(ctx),
        }
    }
}

impl State {
    /// State wired against a test server, with a session token already in
    /// place so the toggle/edit paths are reachable.
    pub fn test(base_url: String) -> Self {
        let mut ctx = StateCtx::new();
        ctx.add_state(BusinessConfig::new(base_url));
        let mut ctx = register(ctx);
        ctx.update::<CsrfTokenState>(|token| token.set(Some("testtoken".to_owned())));
        Self { ctx }
    }
}
