//! The ownership guard: "is this caller authenticated" AND "does this
//! caller own the target resource".
//!
//! Resource repositories must route every owner-scoped read and mutation
//! through [`OwnershipGuard::authorize`] instead of hand-rolling checks;
//! this is the single choke point that keeps the outcome policy uniform.

use std::future::Future;

use friday_core::types::{DbId, Owned, Token};
use friday_core::{CoreError, Outcome};

use crate::service::{AuthResult, SessionService};

/// Composes an identity check with a resource lookup-and-compare step.
#[derive(Clone)]
pub struct OwnershipGuard {
    sessions: SessionService,
}

impl OwnershipGuard {
    pub fn new(sessions: SessionService) -> Self {
        Self { sessions }
    }

    /// The underlying session service, for operations that need an
    /// identity check before any resource exists (e.g. creation).
    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    /// Gate access to an owned resource.
    ///
    /// Order matters: the identity check runs first, and on failure the
    /// lookup is never executed, so an unauthenticated caller learns
    /// nothing about resource existence. After a proven identity, an
    /// absent resource is `NotFound`; a resource owned by someone else is
    /// `Unauthorized`, indistinguishable from bad credentials.
    ///
    /// The successful identity check also refreshes the session's sliding
    /// expiry window.
    pub async fn authorize<R, F, Fut>(&self, user_id: DbId, token: Token, lookup: F) -> AuthResult<R>
    where
        R: Owned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<R>, CoreError>>,
    {
        let Outcome::Ok(session) = self.sessions.check_identity(user_id, token).await? else {
            return Ok(Outcome::Unauthorized);
        };

        let Some(resource) = lookup().await? else {
            return Ok(Outcome::NotFound);
        };

        if resource.owner_id() != session.user_id {
            return Ok(Outcome::Unauthorized);
        }

        Ok(Outcome::Ok(resource))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use uuid::Uuid;

    use friday_core::Sha512Hasher;
    use friday_db::models::NewUser;
    use friday_db::{MemoryStore, Store};

    use super::*;

    /// Minimal owned resource for exercising the guard.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        id: DbId,
        owner_id: DbId,
    }

    impl Owned for Note {
        fn owner_id(&self) -> DbId {
            self.owner_id
        }
    }

    struct Fixture {
        guard: OwnershipGuard,
        sessions: SessionService,
        alice: DbId,
        bob: DbId,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let hasher = Sha512Hasher::new("test-secret");
        let alice = store
            .insert_user(NewUser {
                username: "alice".into(),
                password_digest: hasher.hash("pw1"),
            })
            .await
            .unwrap()
            .id;
        let bob = store
            .insert_user(NewUser {
                username: "bob".into(),
                password_digest: hasher.hash("pw2"),
            })
            .await
            .unwrap()
            .id;
        let sessions = SessionService::new(store, hasher);
        Fixture {
            guard: OwnershipGuard::new(sessions.clone()),
            sessions,
            alice,
            bob,
        }
    }

    #[tokio::test]
    async fn owner_with_valid_session_is_authorized() {
        let f = fixture().await;
        let session = f.sessions.login("alice", "pw1").await.unwrap().ok().unwrap();
        let note = Note {
            id: Uuid::new_v4(),
            owner_id: f.alice,
        };

        let outcome = f
            .guard
            .authorize(f.alice, session.token, || async { Ok(Some(note.clone())) })
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Ok(note));
    }

    #[tokio::test]
    async fn missing_resource_is_not_found_after_identity() {
        let f = fixture().await;
        let session = f.sessions.login("alice", "pw1").await.unwrap().ok().unwrap();

        let outcome: Outcome<Note> = f
            .guard
            .authorize(f.alice, session.token, || async { Ok(None) })
            .await
            .unwrap();
        assert_matches!(outcome, Outcome::NotFound);
    }

    #[tokio::test]
    async fn foreign_resource_is_unauthorized_not_not_found() {
        let f = fixture().await;
        let session = f.sessions.login("bob", "pw2").await.unwrap().ok().unwrap();
        let alices_note = Note {
            id: Uuid::new_v4(),
            owner_id: f.alice,
        };

        // The resource exists, but bob does not own it.
        let outcome = f
            .guard
            .authorize(f.bob, session.token, || async { Ok(Some(alices_note)) })
            .await
            .unwrap();
        assert_matches!(outcome, Outcome::Unauthorized);
    }

    #[tokio::test]
    async fn failed_identity_skips_the_lookup() {
        let f = fixture().await;
        let looked_up = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&looked_up);

        let outcome: Outcome<Note> = f
            .guard
            .authorize(f.alice, Uuid::new_v4(), move || async move {
                flag.store(true, Ordering::SeqCst);
                Ok(None)
            })
            .await
            .unwrap();

        assert_matches!(outcome, Outcome::Unauthorized);
        assert!(!looked_up.load(Ordering::SeqCst), "lookup must not run");
    }

    #[tokio::test]
    async fn revoked_session_is_unauthorized() {
        let f = fixture().await;
        let session = f.sessions.login("alice", "pw1").await.unwrap().ok().unwrap();
        f.sessions.logout(session.token).await.unwrap();

        let note = Note {
            id: Uuid::new_v4(),
            owner_id: f.alice,
        };
        let outcome = f
            .guard
            .authorize(f.alice, session.token, || async { Ok(Some(note)) })
            .await
            .unwrap();
        assert_matches!(outcome, Outcome::Unauthorized);
    }
}
