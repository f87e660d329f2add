//! Storage layer for the friday calendar backend.
//!
//! The rest of the system talks to persistence through the [`Store`] trait:
//! a transactional query interface whose every method is a single atomic
//! operation against the backing store. Two backends are provided --
//! [`MemoryStore`] for tests and local runs, and [`PgStore`] over PostgreSQL.

pub mod error;
pub mod models;
pub mod store;

pub use error::StoreError;
pub use store::memory::MemoryStore;
pub use store::postgres::PgStore;
pub use store::Store;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
