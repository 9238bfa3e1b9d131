//! Integration tests for the initial users fetch on app load.
//!
//! The dashboard fetches the recent-users list once when it first shows;
//! a spinner is visible while the fetch is in flight.

#![cfg(not(target_arch = "wasm32"))]

mod common;

use std::time::Duration;

use common::{TestCtx, default_users_body};
use kittest::Queryable;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn initial_fetch_displays_users() {
    let mut ctx = TestCtx::new_app().await;
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_users_body()))
        .expect(1)
        .mount(ctx.mock_server())
        .await;

    ctx.harness_mut().step();
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(
        harness.query_all_by_label_contains("jgarcia").next().is_some(),
        "first user row should be visible after the fetch"
    );
    assert!(harness.query_all_by_label_contains("mlopez").next().is_some());
    assert!(
        harness.query_by_label("Activo").is_some()
            && harness.query_by_label("Inactivo").is_some(),
        "status column shows each user's active flag"
    );
}

#[tokio::test]
async fn loading_spinner_shows_while_fetch_is_in_flight() {
    let mut ctx = TestCtx::new_app().await;
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(default_users_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(ctx.mock_server())
        .await;

    let harness = ctx.harness_mut();
    harness.step();
    harness.step();

    assert!(
        harness.query_by_label("Cargando...").is_some(),
        "the table shows the loading label while the request is pending"
    );
}

#[tokio::test]
async fn fetch_error_is_shown_in_the_table() {
    let mut ctx = TestCtx::new_app().await;
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(ctx.mock_server())
        .await;

    ctx.harness_mut().step();
    ctx.settle().await;

    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Status code: 502")
            .is_some(),
        "a failed list fetch surfaces inline, not as an alert"
    );
}

#[tokio::test]
async fn dashboard_stats_follow_the_loaded_list() {
    let mut ctx = TestCtx::new_app().await;
    Mock::given(method("GET"))
        .and(path("/admin-dashboard/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(default_users_body()))
        .mount(ctx.mock_server())
        .await;

    ctx.harness_mut().step();
    ctx.settle().await;

    let harness = ctx.harness_mut();
    // Two users, one doctor (50.0%), one patient.
    assert!(harness.query_by_label("Doctores").is_some());
    assert!(harness.query_by_label_contains("50%").is_some());
}
