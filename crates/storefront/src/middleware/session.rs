//! Session middleware configuration.
//!
//! Sessions are held in process memory and do not survive a restart. The
//! store is a `moka` cache bounded by `STOREFRONT_SESSION_CAPACITY`, and
//! sessions idle for longer than the cookie expiry are evicted.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::cookie::time::{self, OffsetDateTime};
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "parcel_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// In-memory session store with capacity and idle-time eviction.
#[derive(Clone)]
pub struct CachedSessionStore {
    cache: Cache<Id, Record>,
}

impl CachedSessionStore {
    /// Create a store holding at most `capacity` sessions, each evicted after
    /// `time_to_idle` without reads or writes.
    #[must_use]
    pub fn new(capacity: u64, time_to_idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(time_to_idle)
            .build();
        Self { cache }
    }
}

impl fmt::Debug for CachedSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedSessionStore")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[async_trait]
impl SessionStore for CachedSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        loop {
            let entry = self
                .cache
                .entry(record.id)
                .or_insert_with(async { record.clone() })
                .await;
            if entry.is_fresh() {
                return Ok(());
            }
            // Id collision, draw another.
            record.id = Id::default();
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .cache
            .get(session_id)
            .await
            .filter(|record| record.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(session_id).await;
        Ok(())
    }
}

/// Create the session layer with a bounded in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<CachedSessionStore> {
    let idle = Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs());
    SessionManagerLayer::new(CachedSessionStore::new(config.session_capacity, idle))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(expires_in: time::Duration) -> Record {
        Record {
            id: Id::default(),
            data: Default::default(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    fn store(capacity: u64) -> CachedSessionStore {
        CachedSessionStore::new(capacity, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_create_then_load() {
        let store = store(10);
        let mut session = record(time::Duration::minutes(30));
        store.create(&mut session).await.unwrap();

        assert_eq!(store.load(&session.id).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_create_draws_new_id_on_collision() {
        let store = store(10);
        let mut first = record(time::Duration::minutes(30));
        store.create(&mut first).await.unwrap();

        let mut second = record(time::Duration::minutes(30));
        second.id = first.id;
        store.create(&mut second).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.load(&first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_expired_record_is_not_loaded() {
        let store = store(10);
        let session = record(time::Duration::seconds(-1));
        store.save(&session).await.unwrap();

        assert_eq!(store.load(&session.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store(10);
        let mut session = record(time::Duration::minutes(30));
        store.create(&mut session).await.unwrap();
        store.delete(&session.id).await.unwrap();

        assert_eq!(store.load(&session.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_capacity_bounds_anonymous_sessions() {
        let store = store(8);
        for _ in 0..200 {
            let mut session = record(time::Duration::minutes(30));
            store.create(&mut session).await.unwrap();
        }
        store.cache.run_pending_tasks().await;

        assert!(store.cache.entry_count() <= 8);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_evicted() {
        let store = CachedSessionStore::new(10, Duration::from_millis(20));
        let mut session = record(time::Duration::minutes(30));
        store.create(&mut session).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        store.cache.run_pending_tasks().await;

        assert_eq!(store.load(&session.id).await.unwrap(), None);
        assert_eq!(store.cache.entry_count(), 0);
    }
}
