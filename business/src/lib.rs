//! Business layer of the CliniDesk admin console.
//!
//! Everything in here is expressed against the `clinidesk-states` runtime:
//! plain [`State`](clinidesk_states::State)s hold user input and session
//! data, [`Compute`](clinidesk_states::Compute) caches hold fetched or
//! derived results, and [`Command`](clinidesk_states::Command)s carry the
//! user gestures (refresh, edit, toggle status) including their network IO.
//! The UI crate only reads states/caches and dispatches commands.

mod admin_api;
mod alerts;
mod api_status;
mod config;
mod csrf_token;
mod route;
mod users;

pub use clinidesk_utils::version_info;

pub use admin_api::{
    AdminUser, ApiError, EditUserRequest, ListUsersResponse, StatusResponse, UserRole,
};
pub use alerts::{
    Alert, AlertsState, MSG_CSRF_MISSING, MSG_INVALID_USER_ID, MSG_REQUEST_FAILED,
    MSG_TOGGLE_FAILED,
};
pub use api_status::{APIAvailability, ApiStatus};
pub use config::BusinessConfig;
pub use csrf_token::CsrfTokenState;
pub use route::Route;
pub use users::edit::{
    EditSubmitCompute, EditSubmitState, EditUserFormState, OpenEditUserCommand,
    ReturnToDashboardCommand, SubmitEditUserCommand,
};
pub use users::list_compute::{RefreshUsersCommand, UsersListCompute, UsersListState};
pub use users::stats_compute::DashboardStatsCompute;
pub use users::toggle::{
    CONFIRM_TOGGLE_PROMPT, CancelToggleCommand, ConfirmToggleCommand, RequestToggleCommand,
    ResolveToggleOutcomeCommand, ToggleConfirmState, ToggleOutcome, ToggleStatusCompute,
    UserActionInput,
};
