//! Login session model.

use sqlx::FromRow;

use friday_core::types::{DbId, Owned, Timestamp, Token};

/// A session row from the `sessions` table.
///
/// One row per authenticated client instance; a user may hold many
/// concurrent sessions (multi-device). `last_refresh` slides forward on
/// every successful identity check and is what the expiry sweep compares
/// against.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Session {
    pub token: Token,
    pub user_id: DbId,
    pub last_refresh: Timestamp,
    pub created_at: Timestamp,
}

impl Owned for Session {
    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

/// Input for persisting a freshly issued session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub token: Token,
    pub user_id: DbId,
    pub last_refresh: Timestamp,
}
