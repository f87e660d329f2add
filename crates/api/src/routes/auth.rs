//! Handlers and routes for the `/auth` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use friday_core::types::{DbId, Timestamp, Token};
use friday_db::models::Session;

use crate::error::AppResult;
use crate::response::outcome_response;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub token: Token,
}

/// Request body for `POST /auth/logout-all`.
#[derive(Debug, Deserialize)]
pub struct LogoutAllRequest {
    pub user_id: DbId,
}

/// Request body for `POST /auth/check`.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub user_id: DbId,
    pub token: Token,
}

/// A live session on the wire.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: Token,
    pub user_id: DbId,
    pub last_refresh: Timestamp,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user_id: session.user_id,
            last_refresh: session.last_refresh,
        }
    }
}

/// Response body for `POST /auth/logout-all`.
#[derive(Debug, Serialize)]
pub struct RevokedResponse {
    pub revoked: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Issues a fresh opaque token.
/// Unknown username and wrong password both answer 401.
async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let outcome = state.sessions.login(&input.username, &input.password).await?;
    Ok(outcome_response(
        StatusCode::CREATED,
        outcome.map(SessionResponse::from),
    ))
}

/// POST /api/v1/auth/logout
///
/// Revoke one session. An already-revoked or unknown token answers 401.
async fn logout(
    State(state): State<AppState>,
    Json(input): Json<LogoutRequest>,
) -> AppResult<Response> {
    let outcome = state.sessions.logout(input.token).await?;
    Ok(outcome_response(
        StatusCode::OK,
        outcome.map(SessionResponse::from),
    ))
}

/// POST /api/v1/auth/logout-all
///
/// Revoke every session of the user, reporting how many went away.
async fn logout_all(
    State(state): State<AppState>,
    Json(input): Json<LogoutAllRequest>,
) -> AppResult<Response> {
    let outcome = state.sessions.logout_all(input.user_id).await?;
    Ok(outcome_response(
        StatusCode::OK,
        outcome.map(|revoked| RevokedResponse { revoked }),
    ))
}

/// POST /api/v1/auth/check
///
/// Verify a `(user, token)` pair and slide its expiry window forward.
async fn check(
    State(state): State<AppState>,
    Json(input): Json<CheckRequest>,
) -> AppResult<Response> {
    let outcome = state
        .sessions
        .check_identity(input.user_id, input.token)
        .await?;
    Ok(outcome_response(
        StatusCode::OK,
        outcome.map(SessionResponse::from),
    ))
}

/// Routes mounted at `/auth`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/logout-all", post(logout_all))
        .route("/check", post(check))
}
