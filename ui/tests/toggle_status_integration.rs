//! Integration tests for the status-toggle flow, driven through the
//! rendered dashboard: row button, confirmation dialog, request, and the
//! reload-or-alert outcome.

#![cfg(not(target_arch = "wasm32"))]

mod common;

use clinidesk_business::{
    AlertsState, CONFIRM_TOGGLE_PROMPT, CsrfTokenState, MSG_CSRF_MISSING, MSG_INVALID_USER_ID,
    MSG_REQUEST_FAILED, MSG_TOGGLE_FAILED, RequestToggleCommand, ToggleConfirmState,
    UserActionInput,
};
use common::{TestCtx, default_users_body};
use kittest::Queryable;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

const TOGGLE_PATH: &str = "/admin-dashboard/users/toggle-status/7/";

/// Loads the dashboard and clicks "Desactivar" on the active user's row,
/// leaving the confirmation dialog open.
async fn open_confirmation(ctx: &mut TestCtx<'_>) {
    ctx.harness_mut().step();
    ctx.settle().await;

    ctx.harness_mut().get_by_label("Desactivar").click();
    ctx.harness_mut().step();
    ctx.harness_mut().step();

    assert!(
        ctx.harness_mut()
            .query_by_label(CONFIRM_TOGGLE_PROMPT)
            .is_some(),
        "the confirmation dialog must be open"
    );
}

fn alert_messages(ctx: &mut TestCtx<'_>) -> Vec<String> {
    ctx.harness_mut()
        .state_mut()
        .state()
        .ctx
        .state::<AlertsState>()
        .messages()
        .map(str::to_owned)
        .collect()
}

#[tokio::test]
async fn declined_confirmation_sends_no_request() {
    let mut ctx = TestCtx::new_app().await;
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_users_body()))
        .mount(ctx.mock_server())
        .await;
    Mock::given(method("POST"))
        .and(path(TOGGLE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(ctx.mock_server())
        .await;

    open_confirmation(&mut ctx).await;
    ctx.harness_mut().get_by_label("Cancelar").click();
    ctx.harness_mut().step();
    ctx.settle().await;

    assert!(
        ctx.harness_mut()
            .query_by_label(CONFIRM_TOGGLE_PROMPT)
            .is_none(),
        "cancel closes the dialog"
    );
    assert!(alert_messages(&mut ctx).is_empty(), "cancel is silent");
}

#[tokio::test]
async fn missing_token_alerts_and_sends_no_request() {
    let mut ctx = TestCtx::new_app().await;
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_users_body()))
        .mount(ctx.mock_server())
        .await;
    Mock::given(method("POST"))
        .and(path(TOGGLE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(ctx.mock_server())
        .await;

    open_confirmation(&mut ctx).await;

    // Session lost its token between page load and confirmation.
    ctx.harness_mut()
        .state_mut()
        .state_mut()
        .ctx
        .update::<CsrfTokenState>(|token| token.set(None));

    ctx.harness_mut().get_by_label("Confirmar").click();
    ctx.harness_mut().step();
    ctx.settle().await;

    assert_eq!(alert_messages(&mut ctx), vec![MSG_CSRF_MISSING]);
}

#[tokio::test]
async fn successful_toggle_reloads_the_users_list_once() {
    let mut ctx = TestCtx::new_app().await;
    // Initial load + exactly one reload after the success.
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_users_body()))
        .expect(2)
        .mount(ctx.mock_server())
        .await;
    Mock::given(method("POST"))
        .and(path(TOGGLE_PATH))
        .and(header("X-CSRFToken", "testtoken"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Usuario desactivado exitosamente.",
            "new_status": false
        })))
        .expect(1)
        .mount(ctx.mock_server())
        .await;

    open_confirmation(&mut ctx).await;
    ctx.harness_mut().get_by_label("Confirmar").click();
    ctx.harness_mut().step();
    ctx.settle().await;

    assert!(
        alert_messages(&mut ctx).is_empty(),
        "success shows no alert, the reload is the feedback"
    );
}

#[tokio::test]
async fn declined_by_server_shows_the_specific_alert() {
    let mut ctx = TestCtx::new_app().await;
    // Only the initial load; a refused toggle must not reload.
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_users_body()))
        .expect(1)
        .mount(ctx.mock_server())
        .await;
    Mock::given(method("POST"))
        .and(path(TOGGLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": "Sin permisos"
        })))
        .expect(1)
        .mount(ctx.mock_server())
        .await;

    open_confirmation(&mut ctx).await;
    ctx.harness_mut().get_by_label("Confirmar").click();
    ctx.harness_mut().step();
    ctx.settle().await;

    assert_eq!(alert_messages(&mut ctx), vec![MSG_TOGGLE_FAILED]);
    assert!(
        ctx.harness_mut().query_by_label(MSG_TOGGLE_FAILED).is_some(),
        "the alert dialog is visible"
    );
}

#[tokio::test]
async fn server_error_shows_the_generic_alert() {
    let mut ctx = TestCtx::new_app().await;
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_users_body()))
        .expect(1)
        .mount(ctx.mock_server())
        .await;
    Mock::given(method("POST"))
        .and(path(TOGGLE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(ctx.mock_server())
        .await;

    open_confirmation(&mut ctx).await;
    ctx.harness_mut().get_by_label("Confirmar").click();
    ctx.harness_mut().step();
    ctx.settle().await;

    assert_eq!(alert_messages(&mut ctx), vec![MSG_REQUEST_FAILED]);
}

#[tokio::test]
async fn alert_dialog_dismisses_on_accept() {
    let mut ctx = TestCtx::new_app().await;
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_users_body()))
        .mount(ctx.mock_server())
        .await;
    Mock::given(method("POST"))
        .and(path(TOGGLE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(ctx.mock_server())
        .await;

    open_confirmation(&mut ctx).await;
    ctx.harness_mut().get_by_label("Confirmar").click();
    ctx.harness_mut().step();
    ctx.settle().await;
    assert!(ctx.harness_mut().query_by_label(MSG_REQUEST_FAILED).is_some());

    ctx.harness_mut().get_by_label("Aceptar").click();
    ctx.harness_mut().step();
    ctx.harness_mut().step();

    assert!(ctx.harness_mut().query_by_label(MSG_REQUEST_FAILED).is_none());
    assert!(alert_messages(&mut ctx).is_empty());
}

#[tokio::test]
async fn invalid_id_alerts_without_opening_the_dialog() {
    let mut ctx = TestCtx::new_app().await;
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_users_body()))
        .mount(ctx.mock_server())
        .await;

    ctx.harness_mut().step();
    ctx.settle().await;

    // The table never produces a missing id; simulate the caller bug at the
    // command boundary, once for a missing id and once for zero.
    for bad_id in [None, Some(0)] {
        let app_ctx = &mut ctx.harness_mut().state_mut().state_mut().ctx;
        app_ctx.update::<UserActionInput>(|input| input.user_id = bad_id);
        app_ctx.dispatch::<RequestToggleCommand>();
    }
    ctx.harness_mut().step();

    assert_eq!(
        alert_messages(&mut ctx),
        vec![MSG_INVALID_USER_ID, MSG_INVALID_USER_ID]
    );
    let pending = ctx
        .harness_mut()
        .state_mut()
        .state()
        .ctx
        .state::<ToggleConfirmState>()
        .pending;
    assert_eq!(pending, None, "no confirmation opens for an invalid id");
}

#[tokio::test]
async fn rapid_toggles_are_not_deduplicated() {
    let mut ctx = TestCtx::new_app().await;
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_users_body()))
        .mount(ctx.mock_server())
        .await;
    Mock::given(method("POST"))
        .and(path(TOGGLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false
        })))
        .expect(2)
        .mount(ctx.mock_server())
        .await;

    open_confirmation(&mut ctx).await;
    ctx.harness_mut().get_by_label("Confirmar").click();
    ctx.harness_mut().step();
    ctx.settle().await;

    // Second gesture for the same user; nothing guards the repeat.
    ctx.harness_mut().get_by_label("Desactivar").click();
    ctx.harness_mut().step();
    ctx.harness_mut().step();
    ctx.harness_mut().get_by_label("Confirmar").click();
    ctx.harness_mut().step();
    ctx.settle().await;

    assert_eq!(
        alert_messages(&mut ctx),
        vec![MSG_TOGGLE_FAILED, MSG_TOGGLE_FAILED],
        "both toggles reach the server and both outcomes surface"
    );
}
