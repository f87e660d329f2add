//! Integration tests for the `/users` endpoints: registration, password
//! rotation, and account deletion.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_json, post_json, put_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_the_new_user_without_its_digest() {
    let app = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({ "username": "alice", "password": "pw1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"]["id"].is_string());
    assert!(
        body["data"].get("password_digest").is_none(),
        "digest must never appear on the wire"
    );
}

#[tokio::test]
async fn duplicate_username_answers_409() {
    let app = common::build_test_app();
    common::register_user(&app, "alice", "pw1").await;

    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({ "username": "alice", "password": "other" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn blank_username_answers_400() {
    let app = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({ "username": "   ", "password": "pw1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Password rotation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn change_password_requires_the_current_one() {
    let app = common::build_test_app();
    let user_id = common::register_user(&app, "alice", "pw1").await;

    let wrong = put_json(
        app.clone(),
        &format!("/api/v1/users/{user_id}/password"),
        json!({ "current_password": "nope", "new_password": "pw2" }),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let right = put_json(
        app.clone(),
        &format!("/api/v1/users/{user_id}/password"),
        json!({ "current_password": "pw1", "new_password": "pw2" }),
    )
    .await;
    assert_eq!(right.status(), StatusCode::OK);

    // Only the new password authenticates now.
    let old_login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "username": "alice", "password": "pw1" }),
    )
    .await;
    assert_eq!(old_login.status(), StatusCode::UNAUTHORIZED);
    common::login(&app, "alice", "pw2").await;
}

#[tokio::test]
async fn change_password_for_an_unknown_account_answers_404() {
    let app = common::build_test_app();

    let response = put_json(
        app.clone(),
        "/api/v1/users/00000000-0000-0000-0000-000000000000/password",
        json!({ "current_password": "pw1", "new_password": "pw2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Account deletion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_account_cascades_to_sessions_and_events() {
    let app = common::build_test_app();
    let user_id = common::register_user(&app, "alice", "pw1").await;
    let token = common::login(&app, "alice", "pw1").await;

    let create = post_json(
        app.clone(),
        "/api/v1/events",
        json!({
            "user_id": user_id,
            "token": token,
            "event": {
                "title": "standup",
                "description": null,
                "place": null,
                "recur_rule": null,
                "start_date": "2026-09-01T09:00:00Z",
                "end_date": null,
                "latitude": null,
                "longitude": null,
            },
        }),
    )
    .await;
    assert_eq!(create.status(), StatusCode::CREATED);

    let response = delete_json(
        app.clone(),
        &format!("/api/v1/users/{user_id}"),
        Some(json!({ "password": "pw1" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["sessions_revoked"], 1);
    assert_eq!(body["data"]["events_deleted"], 1);

    // The account is gone; its credentials stop working entirely.
    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "username": "alice", "password": "pw1" }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_account_with_the_wrong_password_answers_401() {
    let app = common::build_test_app();
    let user_id = common::register_user(&app, "alice", "pw1").await;

    let response = delete_json(
        app.clone(),
        &format!("/api/v1/users/{user_id}"),
        Some(json!({ "password": "nope" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Still able to log in.
    common::login(&app, "alice", "pw1").await;
}
