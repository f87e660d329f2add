pub mod auth;
pub mod events;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login            login (public)
/// /auth/logout           revoke one session
/// /auth/logout-all       revoke every session of a user
/// /auth/check            verify a (user, token) pair
///
/// /users                 register (public)
/// /users/{id}/password   change password (password re-auth)
/// /users/{id}            delete account (password re-auth)
///
/// /events                create, list own (session required)
/// /events/{id}           get, update, delete (session + ownership)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/events", events::router())
}
