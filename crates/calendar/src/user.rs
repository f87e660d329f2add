//! User self-service: registration, password changes, and account
//! deletion.
//!
//! Unlike event operations these are not gated on a session token; the
//! caller re-authenticates with the account password, so a stolen token is
//! never enough to change credentials or destroy the account.

use std::sync::Arc;

use friday_core::types::DbId;
use friday_core::{text, CoreError, Outcome, Sha512Hasher};
use friday_db::models::{DeletedUser, NewUser, User};
use friday_db::Store;
use friday_session::AuthResult;

/// Account lifecycle repository.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn Store>,
    hasher: Sha512Hasher,
}

impl UserRepository {
    pub fn new(store: Arc<dyn Store>, hasher: Sha512Hasher) -> Self {
        Self { store, hasher }
    }

    /// Create an account. Duplicate usernames fail with a conflict error.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, CoreError> {
        text::require_not_blank("username", username)?;
        text::require_not_blank("password", password)?;

        let user = self
            .store
            .insert_user(NewUser {
                username: username.trim().to_string(),
                password_digest: self.hasher.hash(password),
            })
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Plain lookup, no authentication. Callers must not expose the row's
    /// digest.
    pub async fn find(&self, id: DbId) -> Result<Option<User>, CoreError> {
        Ok(self.store.find_user(id).await?)
    }

    /// Rotate the password after proving knowledge of the current one.
    pub async fn update_password(
        &self,
        id: DbId,
        current_password: &str,
        new_password: &str,
    ) -> AuthResult<User> {
        text::require_not_blank("password", new_password)?;

        let user = match self.verify_password(id, current_password).await? {
            Outcome::Ok(user) => user,
            denied => return Ok(denied),
        };

        match self
            .store
            .update_user_password(user.id, &self.hasher.hash(new_password))
            .await?
        {
            Some(updated) => {
                tracing::info!(user_id = %updated.id, "password updated");
                Ok(Outcome::Ok(updated))
            }
            None => Ok(Outcome::NotFound),
        }
    }

    /// Destroy the account and everything it owns, after proving knowledge
    /// of the password. Sessions and events go in the same transaction as
    /// the user row.
    pub async fn delete(&self, id: DbId, password: &str) -> AuthResult<DeletedUser> {
        let user = match self.verify_password(id, password).await? {
            Outcome::Ok(user) => user,
            Outcome::NotFound => return Ok(Outcome::NotFound),
            Outcome::Unauthorized => return Ok(Outcome::Unauthorized),
        };

        match self.store.delete_user(user.id).await? {
            Some(deleted) => {
                tracing::info!(
                    user_id = %deleted.user.id,
                    sessions_revoked = deleted.sessions_revoked,
                    events_deleted = deleted.events_deleted,
                    "user deleted"
                );
                Ok(Outcome::Ok(deleted))
            }
            None => Ok(Outcome::NotFound),
        }
    }

    /// Password-based re-authentication. A missing account is `NotFound`
    /// here: the caller already holds the id, so there is nothing left to
    /// hide, and the distinction lets clients drop stale local state.
    async fn verify_password(&self, id: DbId, password: &str) -> AuthResult<User> {
        let Some(user) = self.store.find_user(id).await? else {
            return Ok(Outcome::NotFound);
        };

        if !self.hasher.verify(password, &user.password_digest) {
            return Ok(Outcome::Unauthorized);
        }

        Ok(Outcome::Ok(user))
    }
}
