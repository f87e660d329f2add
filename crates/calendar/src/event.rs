//! Authorization-gated CRUD over calendar events.
//!
//! Every operation takes the caller's `(user_id, token)` pair and consults
//! the ownership guard before touching the store. Payload validation is a
//! precondition check and fails the operation with a validation error,
//! separate from the tri-state outcome.

use std::sync::Arc;

use friday_core::types::{DbId, Token};
use friday_core::{recurrence, text, CoreError, Outcome};
use friday_db::models::{Event, EventDraft};
use friday_db::Store;
use friday_session::{AuthResult, OwnershipGuard};

/// Gated event repository.
#[derive(Clone)]
pub struct EventRepository {
    store: Arc<dyn Store>,
    guard: OwnershipGuard,
}

impl EventRepository {
    pub fn new(store: Arc<dyn Store>, guard: OwnershipGuard) -> Self {
        Self { store, guard }
    }

    /// Create an event owned by the authenticated user.
    pub async fn save(&self, user_id: DbId, token: Token, draft: EventDraft) -> AuthResult<Event> {
        validate_draft(&draft)?;

        let Outcome::Ok(session) = self.guard.sessions().check_identity(user_id, token).await?
        else {
            return Ok(Outcome::Unauthorized);
        };

        let event = self.store.insert_event(session.user_id, draft).await?;
        tracing::debug!(event_id = %event.id, owner_id = %event.owner_id, "event created");
        Ok(Outcome::Ok(event))
    }

    /// Fetch a single event, if the caller owns it.
    pub async fn find_by_id(&self, id: DbId, user_id: DbId, token: Token) -> AuthResult<Event> {
        let store = Arc::clone(&self.store);
        self.guard
            .authorize(user_id, token, || async move {
                store.find_event(id).await.map_err(Into::into)
            })
            .await
    }

    /// List all events owned by the authenticated user.
    pub async fn find_by_user(&self, user_id: DbId, token: Token) -> AuthResult<Vec<Event>> {
        let Outcome::Ok(session) = self.guard.sessions().check_identity(user_id, token).await?
        else {
            return Ok(Outcome::Unauthorized);
        };

        let events = self.store.events_for_owner(session.user_id).await?;
        Ok(Outcome::Ok(events))
    }

    /// Replace an event's payload, if the caller owns it.
    pub async fn update(
        &self,
        id: DbId,
        user_id: DbId,
        token: Token,
        draft: EventDraft,
    ) -> AuthResult<Event> {
        validate_draft(&draft)?;

        let current = match self.find_by_id(id, user_id, token).await? {
            Outcome::Ok(event) => event,
            denied => return Ok(denied),
        };

        // The write is keyed on (id, owner) so a racing cross-user write
        // cannot land; disappearance between guard and write is NotFound.
        match self.store.update_event(id, current.owner_id, draft).await? {
            Some(updated) => Ok(Outcome::Ok(updated)),
            None => Ok(Outcome::NotFound),
        }
    }

    /// Delete an event, if the caller owns it. Returns the deleted row.
    pub async fn delete(&self, id: DbId, user_id: DbId, token: Token) -> AuthResult<Event> {
        let current = match self.find_by_id(id, user_id, token).await? {
            Outcome::Ok(event) => event,
            denied => return Ok(denied),
        };

        match self.store.delete_event(id, current.owner_id).await? {
            Some(deleted) => {
                tracing::debug!(event_id = %deleted.id, "event deleted");
                Ok(Outcome::Ok(deleted))
            }
            None => Ok(Outcome::NotFound),
        }
    }
}

/// Precondition checks on the full event payload.
fn validate_draft(draft: &EventDraft) -> Result<(), CoreError> {
    text::require_not_blank("title", &draft.title)?;
    text::require_not_blank_opt("description", draft.description.as_deref())?;
    text::require_not_blank_opt("place", draft.place.as_deref())?;

    if let Some(rule) = &draft.recur_rule {
        recurrence::parse(rule)?;
    }

    if let Some(end) = draft.end_date {
        if end <= draft.start_date {
            return Err(CoreError::Validation(
                "end_date must be after start_date".into(),
            ));
        }
    }

    Ok(())
}
