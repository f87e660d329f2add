//! PostgreSQL store backend over sqlx.

use async_trait::async_trait;
use sqlx::PgPool;

use friday_core::types::{DbId, Timestamp, Token};

use crate::error::{classify_sqlx_error, StoreError};
use crate::models::{DeletedUser, Event, EventDraft, NewSession, NewUser, Session, User};
use crate::store::Store;

/// Column lists shared across queries to avoid repetition.
const USER_COLUMNS: &str = "id, username, password_digest, created_at, updated_at";
const SESSION_COLUMNS: &str = "token, user_id, last_refresh, created_at";
const EVENT_COLUMNS: &str = "id, owner_id, title, description, place, recur_rule, \
                             start_date, end_date, latitude, longitude, created_at, updated_at";

/// [`Store`] implementation backed by a PostgreSQL pool.
///
/// Single-statement operations rely on per-statement atomicity; the user
/// cascade runs inside an explicit transaction.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (username, password_digest)
             VALUES ($1, $2)
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&user.username)
            .bind(&user.password_digest)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        Ok(sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        Ok(sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_user_password(
        &self,
        id: DbId,
        password_digest: &str,
    ) -> Result<Option<User>, StoreError> {
        let query = format!(
            "UPDATE users SET password_digest = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(password_digest)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_user(&self, id: DbId) -> Result<Option<DeletedUser>, StoreError> {
        // Explicit two-phase cascade in one transaction: sessions, events,
        // then the user row itself.
        let mut tx = self.pool.begin().await?;

        let sessions_revoked = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let events_deleted = sqlx::query("DELETE FROM events WHERE owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let query = format!("DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(user.map(|user| DeletedUser {
            user,
            sessions_revoked,
            events_deleted,
        }))
    }

    async fn insert_session(&self, session: NewSession) -> Result<Session, StoreError> {
        let query = format!(
            "INSERT INTO sessions (token, user_id, last_refresh)
             VALUES ($1, $2, $3)
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(session.token)
            .bind(session.user_id)
            .bind(session.last_refresh)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn find_session(&self, token: Token) -> Result<Option<Session>, StoreError> {
        let query = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE token = $1");
        Ok(sqlx::query_as::<_, Session>(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn refresh_session(
        &self,
        token: Token,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<Option<Session>, StoreError> {
        // GREATEST keeps last_refresh monotonic under clock skew.
        let query = format!(
            "UPDATE sessions SET last_refresh = GREATEST(last_refresh, $3)
             WHERE token = $1 AND user_id = $2
             RETURNING {SESSION_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Session>(&query)
            .bind(token)
            .bind(user_id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_session(&self, token: Token) -> Result<Option<Session>, StoreError> {
        let query = format!("DELETE FROM sessions WHERE token = $1 RETURNING {SESSION_COLUMNS}");
        Ok(sqlx::query_as::<_, Session>(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_sessions_for_user(&self, user_id: DbId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn sessions(&self) -> Result<Vec<Session>, StoreError> {
        let query = format!("SELECT {SESSION_COLUMNS} FROM sessions");
        Ok(sqlx::query_as::<_, Session>(&query)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn insert_event(&self, owner_id: DbId, draft: EventDraft) -> Result<Event, StoreError> {
        let query = format!(
            "INSERT INTO events (owner_id, title, description, place, recur_rule,
                                 start_date, end_date, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(owner_id)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.place)
            .bind(&draft.recur_rule)
            .bind(draft.start_date)
            .bind(draft.end_date)
            .bind(draft.latitude)
            .bind(draft.longitude)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn find_event(&self, id: DbId) -> Result<Option<Event>, StoreError> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        Ok(sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn events_for_owner(&self, owner_id: DbId) -> Result<Vec<Event>, StoreError> {
        let query =
            format!("SELECT {EVENT_COLUMNS} FROM events WHERE owner_id = $1 ORDER BY start_date");
        Ok(sqlx::query_as::<_, Event>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update_event(
        &self,
        id: DbId,
        owner_id: DbId,
        draft: EventDraft,
    ) -> Result<Option<Event>, StoreError> {
        let query = format!(
            "UPDATE events SET
                title = $3, description = $4, place = $5, recur_rule = $6,
                start_date = $7, end_date = $8, latitude = $9, longitude = $10,
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {EVENT_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.place)
            .bind(&draft.recur_rule)
            .bind(draft.start_date)
            .bind(draft.end_date)
            .bind(draft.latitude)
            .bind(draft.longitude)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_event(&self, id: DbId, owner_id: DbId) -> Result<Option<Event>, StoreError> {
        let query = format!(
            "DELETE FROM events WHERE id = $1 AND owner_id = $2 RETURNING {EVENT_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?)
    }
}
