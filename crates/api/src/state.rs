use std::sync::Arc;

use friday_calendar::{EventRepository, UserRepository};
use friday_core::Sha512Hasher;
use friday_db::{DbPool, Store};
use friday_session::{OwnershipGuard, SessionService};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Backing store; Postgres in production, in-memory without `DATABASE_URL`.
    pub store: Arc<dyn Store>,
    /// Database connection pool, when running against Postgres.
    pub pool: Option<DbPool>,
    /// Session issuance and identity checks.
    pub sessions: SessionService,
    /// Account lifecycle.
    pub users: UserRepository,
    /// Owner-gated event CRUD.
    pub events: EventRepository,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire the service graph over the given store.
    pub fn new(store: Arc<dyn Store>, pool: Option<DbPool>, config: ServerConfig) -> Self {
        let hasher = Sha512Hasher::new(&config.hash_secret);
        let sessions = SessionService::new(Arc::clone(&store), hasher.clone());
        let guard = OwnershipGuard::new(sessions.clone());
        let users = UserRepository::new(Arc::clone(&store), hasher);
        let events = EventRepository::new(Arc::clone(&store), guard);

        Self {
            store,
            pool,
            sessions,
            users,
            events,
            config: Arc::new(config),
        }
    }
}
