mod common;

use axum::http::{Method, StatusCode};
use server::{auth::ROLE_ADMIN, testing::local_principal};

use common::{
    app_with_db_users, app_with_menu, federated, request, request_as, seed_user, send, send_json,
};

#[tokio::test]
async fn test_stub_resolves_local_principal() {
    let (app, _pool) = app_with_menu(Vec::new()).await;

    let (status, body) = send_json(
        &app,
        request_as(
            Method::GET,
            "/api/currentUser",
            local_principal("alice", &[ROLE_ADMIN]),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "alice@example.org");
    assert_eq!(body["user"]["fullName"], "Fake alice");
    assert_eq!(body["user"]["admin"], true);
    assert_eq!(body["user"]["moderator"], false);
    assert_eq!(body["roles"], serde_json::json!([ROLE_ADMIN]));
}

#[tokio::test]
async fn test_no_principal_is_unauthorized() {
    let (app, _pool) = app_with_menu(Vec::new()).await;

    let (status, _) = send(&app, request(Method::GET, "/api/currentUser")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stub_defers_federated_principal() {
    let (app, _pool) = app_with_menu(Vec::new()).await;

    let (status, _) = send(
        &app,
        request_as(Method::GET, "/api/currentUser", federated("real-subject")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_production_resolver_reads_users_table() {
    let (app, pool) = app_with_db_users().await;
    let seeded = seed_user(&pool, "sub-7", false, true).await;

    let (status, body) = send_json(
        &app,
        request_as(Method::GET, "/api/currentUser", federated("sub-7")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"].as_i64().unwrap(), seeded.id);
    assert_eq!(body["user"]["email"], "sub-7@ucsb.edu");
    assert_eq!(
        body["roles"],
        serde_json::json!(["ROLE_USER", "ROLE_MODERATOR"])
    );
}

#[tokio::test]
async fn test_unknown_federated_subject_is_unauthorized() {
    let (app, _pool) = app_with_db_users().await;

    let (status, _) = send(
        &app,
        request_as(Method::GET, "/api/currentUser", federated("sub-unknown")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
