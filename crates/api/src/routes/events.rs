//! Handlers and routes for the `/events` resource.
//!
//! Every operation carries the caller's `(user_id, token)` credential pair:
//! in the JSON body for writes, as query parameters for reads and deletes.
//! Ownership enforcement lives in `friday_calendar::EventRepository`; the
//! handlers only translate outcomes onto the wire.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use friday_core::types::{DbId, Token};
use friday_db::models::EventDraft;

use crate::error::AppResult;
use crate::response::outcome_response;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Credential pair, passed as query parameters on GET and DELETE.
#[derive(Debug, Deserialize)]
pub struct AuthParams {
    pub user_id: DbId,
    pub token: Token,
}

/// Request body for `POST /events` and `PUT /events/{id}`.
#[derive(Debug, Deserialize)]
pub struct EventRequest {
    pub user_id: DbId,
    pub token: Token,
    pub event: EventDraft,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/events
///
/// Create an event owned by the authenticated caller.
async fn create(
    State(state): State<AppState>,
    Json(input): Json<EventRequest>,
) -> AppResult<Response> {
    let outcome = state
        .events
        .save(input.user_id, input.token, input.event)
        .await?;
    Ok(outcome_response(StatusCode::CREATED, outcome))
}

/// GET /api/v1/events
///
/// List every event the caller owns.
async fn list(
    State(state): State<AppState>,
    Query(auth): Query<AuthParams>,
) -> AppResult<Response> {
    let outcome = state.events.find_by_user(auth.user_id, auth.token).await?;
    Ok(outcome_response(StatusCode::OK, outcome))
}

/// GET /api/v1/events/{id}
///
/// Fetch one event. Someone else's event answers 401, never 404.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(auth): Query<AuthParams>,
) -> AppResult<Response> {
    let outcome = state.events.find_by_id(id, auth.user_id, auth.token).await?;
    Ok(outcome_response(StatusCode::OK, outcome))
}

/// PUT /api/v1/events/{id}
///
/// Replace the full event payload.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<EventRequest>,
) -> AppResult<Response> {
    let outcome = state
        .events
        .update(id, input.user_id, input.token, input.event)
        .await?;
    Ok(outcome_response(StatusCode::OK, outcome))
}

/// DELETE /api/v1/events/{id}
async fn remove(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(auth): Query<AuthParams>,
) -> AppResult<Response> {
    let outcome = state.events.delete(id, auth.user_id, auth.token).await?;
    Ok(outcome_response(StatusCode::OK, outcome))
}

/// Routes mounted at `/events`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(remove))
}
