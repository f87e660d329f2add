//! Periodic revocation of expired sessions.
//!
//! A single background task, spawned at boot, that scans all sessions on a
//! fixed interval and revokes any whose sliding window has lapsed. Runs on
//! `tokio::time::interval` plus a [`CancellationToken`] for graceful
//! shutdown; it never touches request-serving paths.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use friday_core::{CoreError, Outcome};
use friday_db::Store;

use crate::config::SessionConfig;
use crate::service::SessionService;

/// The recurring expiry sweep.
pub struct ExpirySweeper {
    store: Arc<dyn Store>,
    sessions: SessionService,
    config: SessionConfig,
}

/// Handle to a spawned sweeper; dropping it does NOT stop the task.
///
/// Call [`SweeperHandle::shutdown`] during process teardown. In-flight
/// revocations are each independently atomic, so cancellation between two
/// of them is safe.
pub struct SweeperHandle {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweep loop and wait for it to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

impl ExpirySweeper {
    pub fn new(store: Arc<dyn Store>, sessions: SessionService, config: SessionConfig) -> Self {
        Self {
            store,
            sessions,
            config,
        }
    }

    /// Spawn the sweep loop. The first pass runs immediately.
    pub fn spawn(self) -> SweeperHandle {
        let cancel = CancellationToken::new();
        let child = cancel.clone();
        let handle = tokio::spawn(async move { self.run(child).await });
        SweeperHandle { cancel, handle }
    }

    async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            lifetime_days = self.config.lifetime_days,
            interval_secs = self.config.sweep_interval_secs,
            "Session sweeper started"
        );

        let mut interval = tokio::time::interval(self.config.sweep_interval());

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Session sweeper stopping");
                    break;
                }
                _ = interval.tick() => {
                    match self.sweep().await {
                        Ok(purged) => {
                            if purged > 0 {
                                tracing::info!(purged, "Session sweep: revoked expired sessions");
                            } else {
                                tracing::debug!("Session sweep: nothing to revoke");
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Session sweep failed");
                        }
                    }
                }
            }
        }
    }

    /// One sweep pass over a snapshot of all sessions.
    ///
    /// Each stale session is revoked through the normal logout path;
    /// per-session failures are logged and skipped so one bad row cannot
    /// starve the rest of the sweep.
    pub async fn sweep(&self) -> Result<u64, CoreError> {
        let now = Utc::now();
        let lifetime = self.config.lifetime();
        let snapshot = self.store.sessions().await?;

        let mut purged = 0u64;
        for session in snapshot {
            if now.signed_duration_since(session.last_refresh) <= lifetime {
                continue;
            }
            match self.sessions.logout(session.token).await {
                Ok(Outcome::Ok(_)) => purged += 1,
                // Already gone, e.g. an explicit logout raced the sweep.
                Ok(_) => {
                    tracing::debug!(user_id = %session.user_id, "expired session already revoked");
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        user_id = %session.user_id,
                        "failed to revoke expired session"
                    );
                }
            }
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;
    use chrono::Utc;
    use uuid::Uuid;

    use friday_core::Sha512Hasher;
    use friday_db::models::{NewSession, NewUser};
    use friday_db::MemoryStore;

    use super::*;

    async fn fixture() -> (Arc<MemoryStore>, SessionService, ExpirySweeper) {
        let store = Arc::new(MemoryStore::new());
        let hasher = Sha512Hasher::new("test-secret");
        let sessions = SessionService::new(store.clone() as Arc<dyn Store>, hasher);
        let sweeper = ExpirySweeper::new(
            store.clone() as Arc<dyn Store>,
            sessions.clone(),
            SessionConfig::default(),
        );
        (store, sessions, sweeper)
    }

    #[tokio::test]
    async fn sweep_revokes_stale_and_keeps_fresh() {
        let (store, sessions, sweeper) = fixture().await;
        let hasher = Sha512Hasher::new("test-secret");
        let alice = store
            .insert_user(NewUser {
                username: "alice".into(),
                password_digest: hasher.hash("pw1"),
            })
            .await
            .unwrap();

        let stale = store
            .insert_session(NewSession {
                token: Uuid::new_v4(),
                user_id: alice.id,
                last_refresh: Utc::now() - chrono::Duration::days(8),
            })
            .await
            .unwrap();
        let fresh = store
            .insert_session(NewSession {
                token: Uuid::new_v4(),
                user_id: alice.id,
                last_refresh: Utc::now() - chrono::Duration::days(6),
            })
            .await
            .unwrap();

        let purged = sweeper.sweep().await.unwrap();
        assert_eq!(purged, 1);

        let outcome = sessions.check_identity(alice.id, stale.token).await.unwrap();
        assert_matches!(outcome, friday_core::Outcome::Unauthorized);
        assert!(sessions
            .check_identity(alice.id, fresh.token)
            .await
            .unwrap()
            .is_ok());
    }

    #[tokio::test]
    async fn sweep_on_empty_store_is_a_no_op() {
        let (_, _, sweeper) = fixture().await;
        assert_eq!(sweeper.sweep().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn spawned_sweeper_shuts_down_cleanly() {
        let (store, sessions, _) = fixture().await;
        let sweeper = ExpirySweeper::new(
            store as Arc<dyn Store>,
            sessions,
            SessionConfig {
                lifetime_days: 7,
                sweep_interval_secs: 1,
            },
        );

        let handle = sweeper.spawn();
        // Give the first immediate tick a chance to run.
        tokio::time::sleep(Duration::from_millis(20)).await;
        tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
            .await
            .expect("shutdown must complete");
    }
}
