//! Wire types and HTTP helpers for the admin dashboard API.
//!
//! All helpers are callback-based on top of `ehttp` so they work the same
//! on native and wasm. Callbacks receive `Result<T, ApiError>`; the caller
//! decides which user-facing message the error collapses into, the helper
//! only logs the diagnostic detail.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an API call failed. Shown to developers through the log, never to
/// the end user directly.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("server returned status {status}")]
    Status { status: u16 },
    #[error("malformed response body: {detail}")]
    Malformed { detail: String },
    #[error("request failed: {detail}")]
    Transport { detail: String },
}

/// Role of a user record, as serialized by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Administrator,
    Doctor,
    Reception,
    Patient,
}

impl UserRole {
    /// Display label, matching the product language.
    pub fn label(self) -> &'static str {
        match self {
            Self::Administrator => "Administrador",
            Self::Doctor => "Doctor",
            Self::Reception => "Recepción",
            Self::Patient => "Paciente",
        }
    }
}

/// One row of the recent-users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub date_joined: chrono::DateTime<chrono::Utc>,
}

impl AdminUser {
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_owned()
        }
    }
}

/// Response of `GET /admin-dashboard/users/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<AdminUser>,
}

/// Outcome envelope shared by the state-changing endpoints.
///
/// `success` is required; a 2xx body without it is treated as malformed.
/// The other fields are informational and tolerated when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /admin-dashboard/users/edit/{id}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

fn parse_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice::<T>(bytes).map_err(|err| ApiError::Malformed {
        detail: err.to_string(),
    })
}

fn json_result<T: serde::de::DeserializeOwned>(
    result: ehttp::Result<ehttp::Response>,
) -> Result<T, ApiError> {
    match result {
        Ok(response) if response.ok => parse_json(&response.bytes),
        Ok(response) => Err(ApiError::Status {
            status: response.status,
        }),
        Err(err) => Err(ApiError::Transport { detail: err }),
    }
}

/// Fetches the recent users list.
pub fn fetch_users(
    dashboard_url: &str,
    callback: impl FnOnce(Result<ListUsersResponse, ApiError>) + Send + 'static,
) {
    let url = format!("{dashboard_url}/users/");
    log::info!("fetching users list from {url}");
    let request = ehttp::Request::get(url);
    ehttp::fetch(request, move |result| {
        callback(json_result(result));
    });
}

/// Flips a user's active status.
///
/// The request declares a JSON content type but carries no body; the
/// deployed endpoint works off the URL alone and this client keeps the
/// wire shape it already accepts.
pub fn toggle_user_status(
    dashboard_url: &str,
    csrf_token: &str,
    user_id: u64,
    callback: impl FnOnce(Result<StatusResponse, ApiError>) + Send + 'static,
) {
    let url = format!("{dashboard_url}/users/toggle-status/{user_id}/");
    log::info!("toggling status of user {user_id} via {url}");

    let mut request = ehttp::Request::post(url, Vec::new());
    request
        .headers
        .insert("X-CSRFToken".to_owned(), csrf_token.to_owned());
    request
        .headers
        .insert("Content-Type".to_owned(), "application/json".to_owned());

    ehttp::fetch(request, move |result| {
        callback(json_result(result));
    });
}

/// Submits the edit-user form.
pub fn edit_user(
    dashboard_url: &str,
    csrf_token: &str,
    user_id: u64,
    body: &EditUserRequest,
    callback: impl FnOnce(Result<StatusResponse, ApiError>) + Send + 'static,
) {
    let url = format!("{dashboard_url}/users/edit/{user_id}/");
    log::info!("submitting edit of user {user_id} to {url}");

    let payload = match serde_json::to_vec(body) {
        Ok(payload) => payload,
        Err(err) => {
            callback(Err(ApiError::Malformed {
                detail: err.to_string(),
            }));
            return;
        }
    };

    let mut request = ehttp::Request::post(url, payload);
    request
        .headers
        .insert("X-CSRFToken".to_owned(), csrf_token.to_owned());
    request
        .headers
        .insert("Content-Type".to_owned(), "application/json".to_owned());

    ehttp::fetch(request, move |result| {
        callback(json_result(result));
    });
}
