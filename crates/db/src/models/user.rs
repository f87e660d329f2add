//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use friday_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password digest -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_digest: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password digest).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Input for creating a new user. The digest is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_digest: String,
}

/// Result of a cascading user deletion.
#[derive(Debug, Clone)]
pub struct DeletedUser {
    pub user: User,
    pub sessions_revoked: u64,
    pub events_deleted: u64,
}
