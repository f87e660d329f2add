//! In-memory store backend.
//!
//! Backs tests and local runs without a database. A single `RwLock` over
//! the whole state serializes every store call, which gives each [`Store`]
//! method the same atomicity the PostgreSQL backend gets from transactions.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use async_trait::async_trait;
use friday_core::types::{DbId, Timestamp, Token};

use crate::error::StoreError;
use crate::models::{DeletedUser, Event, EventDraft, NewSession, NewUser, Session, User};
use crate::store::Store;

#[derive(Default)]
struct Inner {
    users: HashMap<DbId, User>,
    sessions: HashMap<Token, Session>,
    events: HashMap<DbId, Event>,
}

/// Thread-safe in-memory implementation of [`Store`].
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn apply_draft(event: &mut Event, draft: EventDraft, now: Timestamp) {
    event.title = draft.title;
    event.description = draft.description;
    event.place = draft.place;
    event.recur_rule = draft.recur_rule;
    event.start_date = draft.start_date;
    event.end_date = draft.end_date;
    event.latitude = draft.latitude;
    event.longitude = draft.longitude;
    event.updated_at = now;
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict("users.username".into()));
        }
        let now = Utc::now();
        let row = User {
            id: Uuid::new_v4(),
            username: user.username,
            password_digest: user.password_digest,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn update_user_password(
        &self,
        id: DbId,
        password_digest: &str,
    ) -> Result<Option<User>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.get_mut(&id).map(|user| {
            user.password_digest = password_digest.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete_user(&self, id: DbId) -> Result<Option<DeletedUser>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.remove(&id) else {
            return Ok(None);
        };
        let sessions_before = inner.sessions.len();
        inner.sessions.retain(|_, s| s.user_id != id);
        let sessions_revoked = (sessions_before - inner.sessions.len()) as u64;

        let events_before = inner.events.len();
        inner.events.retain(|_, e| e.owner_id != id);
        let events_deleted = (events_before - inner.events.len()) as u64;

        Ok(Some(DeletedUser {
            user,
            sessions_revoked,
            events_deleted,
        }))
    }

    async fn insert_session(&self, session: NewSession) -> Result<Session, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&session.user_id) {
            return Err(StoreError::MissingOwner);
        }
        if inner.sessions.contains_key(&session.token) {
            return Err(StoreError::Conflict("sessions.token".into()));
        }
        let row = Session {
            token: session.token,
            user_id: session.user_id,
            last_refresh: session.last_refresh,
            created_at: Utc::now(),
        };
        inner.sessions.insert(row.token, row.clone());
        Ok(row)
    }

    async fn find_session(&self, token: Token) -> Result<Option<Session>, StoreError> {
        Ok(self.inner.read().await.sessions.get(&token).cloned())
    }

    async fn refresh_session(
        &self,
        token: Token,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<Option<Session>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .sessions
            .get_mut(&token)
            .filter(|s| s.user_id == user_id)
            .map(|s| {
                // Sliding window, never backwards.
                s.last_refresh = s.last_refresh.max(now);
                s.clone()
            }))
    }

    async fn delete_session(&self, token: Token) -> Result<Option<Session>, StoreError> {
        Ok(self.inner.write().await.sessions.remove(&token))
    }

    async fn delete_sessions_for_user(&self, user_id: DbId) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.sessions.len();
        inner.sessions.retain(|_, s| s.user_id != user_id);
        Ok((before - inner.sessions.len()) as u64)
    }

    async fn sessions(&self) -> Result<Vec<Session>, StoreError> {
        Ok(self.inner.read().await.sessions.values().cloned().collect())
    }

    async fn insert_event(&self, owner_id: DbId, draft: EventDraft) -> Result<Event, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&owner_id) {
            return Err(StoreError::MissingOwner);
        }
        let now = Utc::now();
        let row = Event {
            id: Uuid::new_v4(),
            owner_id,
            title: draft.title,
            description: draft.description,
            place: draft.place,
            recur_rule: draft.recur_rule,
            start_date: draft.start_date,
            end_date: draft.end_date,
            latitude: draft.latitude,
            longitude: draft.longitude,
            created_at: now,
            updated_at: now,
        };
        inner.events.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_event(&self, id: DbId) -> Result<Option<Event>, StoreError> {
        Ok(self.inner.read().await.events.get(&id).cloned())
    }

    async fn events_for_owner(&self, owner_id: DbId) -> Result<Vec<Event>, StoreError> {
        let inner = self.inner.read().await;
        let mut events: Vec<Event> = inner
            .events
            .values()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start_date);
        Ok(events)
    }

    async fn update_event(
        &self,
        id: DbId,
        owner_id: DbId,
        draft: EventDraft,
    ) -> Result<Option<Event>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .events
            .get_mut(&id)
            .filter(|e| e.owner_id == owner_id)
            .map(|event| {
                apply_draft(event, draft, Utc::now());
                event.clone()
            }))
    }

    async fn delete_event(&self, id: DbId, owner_id: DbId) -> Result<Option<Event>, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.events.get(&id) {
            Some(event) if event.owner_id == owner_id => Ok(inner.events.remove(&id)),
            _ => Ok(None),
        }
    }
}
