//! Integration tests for the `/events` endpoints: the owner-gated CRUD
//! surface.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_json, get, post_json, put_json};
use serde_json::{json, Value};

fn event_body(user_id: &str, token: &str, title: &str) -> Value {
    json!({
        "user_id": user_id,
        "token": token,
        "event": {
            "title": title,
            "description": "weekly sync",
            "place": "room 2",
            "recur_rule": "FREQ=WEEKLY;BYDAY=MO",
            "start_date": "2026-09-01T09:00:00Z",
            "end_date": "2026-09-01T09:30:00Z",
            "latitude": null,
            "longitude": null,
        },
    })
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_event_lifecycle() {
    let app = common::build_test_app();
    let user_id = common::register_user(&app, "alice", "pw1").await;
    let token = common::login(&app, "alice", "pw1").await;

    // Create.
    let response = post_json(
        app.clone(),
        "/api/v1/events",
        event_body(&user_id, &token, "standup"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["title"], "standup");
    assert_eq!(created["data"]["owner_id"], user_id);
    let event_id = created["data"]["id"].as_str().unwrap().to_string();

    // Read.
    let response = get(
        app.clone(),
        &format!("/api/v1/events/{event_id}?user_id={user_id}&token={token}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // List.
    let response = get(
        app.clone(),
        &format!("/api/v1/events?user_id={user_id}&token={token}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    // Update (full replace).
    let response = put_json(
        app.clone(),
        &format!("/api/v1/events/{event_id}"),
        event_body(&user_id, &token, "retro"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["title"], "retro");

    // Delete.
    let response = delete_json(
        app.clone(),
        &format!("/api/v1/events/{event_id}?user_id={user_id}&token={token}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Gone for its owner.
    let response = get(
        app.clone(),
        &format!("/api/v1/events/{event_id}?user_id={user_id}&token={token}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

#[tokio::test]
async fn someone_elses_event_answers_401_never_404() {
    let app = common::build_test_app();
    let alice_id = common::register_user(&app, "alice", "pw1").await;
    let alice_token = common::login(&app, "alice", "pw1").await;
    let bob_id = common::register_user(&app, "bob", "pw2").await;
    let bob_token = common::login(&app, "bob", "pw2").await;

    let response = post_json(
        app.clone(),
        "/api/v1/events",
        event_body(&alice_id, &alice_token, "standup"),
    )
    .await;
    let event_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Bob holds a perfectly valid session, but does not own the event.
    let read = get(
        app.clone(),
        &format!("/api/v1/events/{event_id}?user_id={bob_id}&token={bob_token}"),
    )
    .await;
    assert_eq!(read.status(), StatusCode::UNAUTHORIZED);

    let update = put_json(
        app.clone(),
        &format!("/api/v1/events/{event_id}"),
        event_body(&bob_id, &bob_token, "hijack"),
    )
    .await;
    assert_eq!(update.status(), StatusCode::UNAUTHORIZED);

    let delete = delete_json(
        app.clone(),
        &format!("/api/v1/events/{event_id}?user_id={bob_id}&token={bob_token}"),
        None,
    )
    .await;
    assert_eq!(delete.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn listing_is_scoped_to_the_caller() {
    let app = common::build_test_app();
    let alice_id = common::register_user(&app, "alice", "pw1").await;
    let alice_token = common::login(&app, "alice", "pw1").await;
    let bob_id = common::register_user(&app, "bob", "pw2").await;
    let bob_token = common::login(&app, "bob", "pw2").await;

    post_json(
        app.clone(),
        "/api/v1/events",
        event_body(&alice_id, &alice_token, "standup"),
    )
    .await;
    post_json(
        app.clone(),
        "/api/v1/events",
        event_body(&bob_id, &bob_token, "1:1"),
    )
    .await;

    let response = get(
        app.clone(),
        &format!("/api/v1/events?user_id={alice_id}&token={alice_token}"),
    )
    .await;
    let listed = body_json(response).await;
    let events = listed["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "standup");
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn a_revoked_session_cannot_touch_events() {
    let app = common::build_test_app();
    let user_id = common::register_user(&app, "alice", "pw1").await;
    let token = common::login(&app, "alice", "pw1").await;

    let response = post_json(
        app.clone(),
        "/api/v1/events",
        event_body(&user_id, &token, "standup"),
    )
    .await;
    let event_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let logout = post_json(app.clone(), "/api/v1/auth/logout", json!({ "token": token })).await;
    assert_eq!(logout.status(), StatusCode::OK);

    let read = get(
        app.clone(),
        &format!("/api/v1/events/{event_id}?user_id={user_id}&token={token}"),
    )
    .await;
    assert_eq!(read.status(), StatusCode::UNAUTHORIZED);

    let create = post_json(
        app.clone(),
        "/api/v1/events",
        event_body(&user_id, &token, "another"),
    )
    .await;
    assert_eq!(create.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_recur_rule_answers_400() {
    let app = common::build_test_app();
    let user_id = common::register_user(&app, "alice", "pw1").await;
    let token = common::login(&app, "alice", "pw1").await;

    let mut body = event_body(&user_id, &token, "standup");
    body["event"]["recur_rule"] = json!("EVERY=TUESDAY");

    let response = post_json(app.clone(), "/api/v1/events", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn end_date_before_start_date_answers_400() {
    let app = common::build_test_app();
    let user_id = common::register_user(&app, "alice", "pw1").await;
    let token = common::login(&app, "alice", "pw1").await;

    let mut body = event_body(&user_id, &token, "standup");
    body["event"]["end_date"] = json!("2026-09-01T08:00:00Z");

    let response = post_json(app.clone(), "/api/v1/events", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
