//! Handlers and routes for the `/users` resource.
//!
//! Account mutations re-authenticate with the account password rather than
//! a session token; see `friday_calendar::UserRepository`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{delete, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use friday_core::types::DbId;
use friday_db::models::{DeletedUser, UserResponse};

use crate::error::AppResult;
use crate::response::{outcome_response, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `PUT /users/{id}/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Request body for `DELETE /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub password: String,
}

/// Response body for `DELETE /users/{id}`.
#[derive(Debug, Serialize)]
pub struct DeletedUserResponse {
    pub id: DbId,
    pub username: String,
    pub sessions_revoked: u64,
    pub events_deleted: u64,
}

impl From<DeletedUser> for DeletedUserResponse {
    fn from(deleted: DeletedUser) -> Self {
        Self {
            id: deleted.user.id,
            username: deleted.user.username,
            sessions_revoked: deleted.sessions_revoked,
            events_deleted: deleted.events_deleted,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Register a new account. A taken username answers 409.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let user = state.users.register(&input.username, &input.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// PUT /api/v1/users/{id}/password
///
/// Rotate the password; requires the current one. An unknown account
/// answers 404, a wrong password 401.
async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Response> {
    let outcome = state
        .users
        .update_password(id, &input.current_password, &input.new_password)
        .await?;
    Ok(outcome_response(
        StatusCode::OK,
        outcome.map(|user| UserResponse::from(&user)),
    ))
}

/// DELETE /api/v1/users/{id}
///
/// Destroy the account and everything it owns; requires the password.
async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DeleteAccountRequest>,
) -> AppResult<Response> {
    let outcome = state.users.delete(id, &input.password).await?;
    Ok(outcome_response(
        StatusCode::OK,
        outcome.map(DeletedUserResponse::from),
    ))
}

/// Routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/{id}/password", put(change_password))
        .route("/{id}", delete(delete_account))
}
