//! Session issuance, revocation, and identity verification.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use friday_core::types::{DbId, Token};
use friday_core::{CoreError, Outcome, Sha512Hasher};
use friday_db::models::{NewSession, Session};
use friday_db::Store;

/// Result of a gated session operation: an [`Outcome`] for the expected
/// authorization paths, or a [`CoreError`] for infrastructure failure.
pub type AuthResult<T> = Result<Outcome<T>, CoreError>;

/// The login/logout protocol and identity checks.
///
/// Per token the state machine is `Anonymous -> Authenticated -> Anonymous`;
/// a successful login issues a fresh opaque token, and every successful
/// identity check slides the session's expiry window forward.
///
/// Unknown usernames, unknown tokens, and owner mismatches all collapse to
/// [`Outcome::Unauthorized`] so callers cannot probe which half of a
/// credential pair was wrong.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn Store>,
    hasher: Sha512Hasher,
}

impl SessionService {
    pub fn new(store: Arc<dyn Store>, hasher: Sha512Hasher) -> Self {
        Self { store, hasher }
    }

    /// Authenticate with username and password, issuing a new session.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<Session> {
        let Some(user) = self.store.find_user_by_username(username).await? else {
            return Ok(Outcome::Unauthorized);
        };

        if !self.hasher.verify(password, &user.password_digest) {
            return Ok(Outcome::Unauthorized);
        }

        let session = self
            .store
            .insert_session(NewSession {
                token: Uuid::new_v4(),
                user_id: user.id,
                last_refresh: Utc::now(),
            })
            .await?;

        tracing::debug!(user_id = %user.id, "session issued");
        Ok(Outcome::Ok(session))
    }

    /// Revoke a single session.
    ///
    /// An unknown token reports `Unauthorized`, so a second logout of the
    /// same token fails at the protocol level while storage stays stable.
    pub async fn logout(&self, token: Token) -> AuthResult<Session> {
        match self.store.delete_session(token).await? {
            Some(session) => {
                tracing::debug!(user_id = %session.user_id, "session revoked");
                Ok(Outcome::Ok(session))
            }
            None => Ok(Outcome::Unauthorized),
        }
    }

    /// Revoke every session of the user, returning the revoked count.
    pub async fn logout_all(&self, user_id: DbId) -> AuthResult<u64> {
        if self.store.find_user(user_id).await?.is_none() {
            return Ok(Outcome::Unauthorized);
        }
        let revoked = self.store.delete_sessions_for_user(user_id).await?;
        tracing::debug!(%user_id, revoked, "all sessions revoked");
        Ok(Outcome::Ok(revoked))
    }

    /// Verify that a live session exists for `(user_id, token)` and slide
    /// its expiry window forward.
    ///
    /// The store performs lookup, owner comparison, and refresh in one
    /// atomic step; absent token and wrong owner are indistinguishable.
    pub async fn check_identity(&self, user_id: DbId, token: Token) -> AuthResult<Session> {
        match self.store.refresh_session(token, user_id, Utc::now()).await? {
            Some(session) => Ok(Outcome::Ok(session)),
            None => Ok(Outcome::Unauthorized),
        }
    }

    /// Validate-and-refresh without handing back the session.
    pub async fn check(&self, user_id: DbId, token: Token) -> AuthResult<()> {
        Ok(self.check_identity(user_id, token).await?.unit())
    }

    /// The hasher shared with user registration and password changes.
    pub fn hasher(&self) -> &Sha512Hasher {
        &self.hasher
    }
}
