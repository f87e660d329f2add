//! The store abstraction consumed by services and repositories.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use friday_core::types::{DbId, Timestamp, Token};

use crate::error::StoreError;
use crate::models::{DeletedUser, Event, EventDraft, NewSession, NewUser, Session, User};

/// Transactional query interface over users, sessions, and events.
///
/// Every method is one atomic operation: backends execute it as a single
/// statement or a single transaction, so callers never observe a partially
/// applied store call. Methods that mutate an owned row take the expected
/// owner and condition the mutation on it, which keeps the ownership
/// comparison and the write in the same atomic step.
///
/// Absence of a row is a normal `Ok(None)`, never an error.
#[async_trait]
pub trait Store: Send + Sync {
    // --- Users ---

    /// Insert a new user. Fails with [`StoreError::Conflict`] if the
    /// username is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Replace the stored password digest. Returns the updated row, or
    /// `None` if the user does not exist.
    async fn update_user_password(
        &self,
        id: DbId,
        password_digest: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Delete a user and everything it owns, in one transaction:
    /// sessions first, then events, then the user row.
    async fn delete_user(&self, id: DbId) -> Result<Option<DeletedUser>, StoreError>;

    // --- Sessions ---

    /// Persist a freshly issued session. Fails with
    /// [`StoreError::MissingOwner`] if the owning user does not exist.
    async fn insert_session(&self, session: NewSession) -> Result<Session, StoreError>;

    async fn find_session(&self, token: Token) -> Result<Option<Session>, StoreError>;

    /// Atomically look up the session by token, verify it belongs to
    /// `user_id`, and slide `last_refresh` forward to `now`. Returns the
    /// refreshed session, or `None` when the token is absent or owned by a
    /// different user -- the two cases are indistinguishable by design.
    ///
    /// `last_refresh` is monotonic non-decreasing per session.
    async fn refresh_session(
        &self,
        token: Token,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<Option<Session>, StoreError>;

    /// Remove a session, returning the removed row if it existed.
    async fn delete_session(&self, token: Token) -> Result<Option<Session>, StoreError>;

    /// Remove every session owned by the user, returning the count.
    async fn delete_sessions_for_user(&self, user_id: DbId) -> Result<u64, StoreError>;

    /// Snapshot of all live sessions. Used only by the expiry sweeper.
    async fn sessions(&self) -> Result<Vec<Session>, StoreError>;

    // --- Events ---

    async fn insert_event(&self, owner_id: DbId, draft: EventDraft) -> Result<Event, StoreError>;

    async fn find_event(&self, id: DbId) -> Result<Option<Event>, StoreError>;

    async fn events_for_owner(&self, owner_id: DbId) -> Result<Vec<Event>, StoreError>;

    /// Replace an event's payload, conditioned on `(id, owner_id)`.
    /// Returns `None` when no row matches both.
    async fn update_event(
        &self,
        id: DbId,
        owner_id: DbId,
        draft: EventDraft,
    ) -> Result<Option<Event>, StoreError>;

    /// Delete an event, conditioned on `(id, owner_id)`.
    async fn delete_event(&self, id: DbId, owner_id: DbId) -> Result<Option<Event>, StoreError>;
}
