//! Concurrent session store with idle eviction.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::observability::metrics;
use crate::session::{SessionId, SessionState};

/// A thread-safe store of per-session state.
///
/// The map handles cross-session concurrency; the per-session `Mutex`
/// serializes access to a single session's fields.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<SessionId, Arc<Mutex<SessionState>>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    /// Create an empty store evicting sessions idle longer than
    /// `idle_ttl`.
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            idle_ttl,
        }
    }

    /// Fetch a session's state, creating it on first contact. Touches
    /// the session's last-seen time.
    pub fn get_or_create(&self, id: SessionId) -> Arc<Mutex<SessionState>> {
        let now = Instant::now();
        let entry = self
            .inner
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(SessionState::new(now))))
            .clone();
        entry
            .lock()
            .expect("session mutex poisoned")
            .last_seen = now;
        entry
    }

    /// Fetch a session's state without creating it.
    pub fn get(&self, id: SessionId) -> Option<Arc<Mutex<SessionState>>> {
        self.inner.get(&id).map(|entry| entry.value().clone())
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drop sessions idle longer than the TTL. Returns how many were
    /// evicted.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let before = self.inner.len();
        let ttl = self.idle_ttl;
        self.inner.retain(|_, state| {
            state
                .lock()
                .map(|s| now.duration_since(s.last_seen) < ttl)
                .unwrap_or(false)
        });
        before - self.inner.len()
    }

    /// Periodic eviction loop, intended for `tokio::spawn`.
    pub async fn run_sweeper(self, interval: Duration) {
        loop {
            tokio::time::sleep(interval).await;
            let evicted = self.evict_idle(Instant::now());
            if evicted > 0 {
                metrics::record_sessions_evicted(evicted);
                tracing::debug!(evicted, live = self.len(), "Evicted idle sessions");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_on_first_contact_and_reuses_after() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = SessionId::new();

        assert!(store.get(id).is_none());
        let first = store.get_or_create(id);
        let second = store.get_or_create(id);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = store.get_or_create(SessionId::new());
        let b = store.get_or_create(SessionId::new());

        a.lock().unwrap().failed_auth_attempts = 3;
        assert_eq!(b.lock().unwrap().failed_auth_attempts, 0);
    }

    #[test]
    fn idle_sessions_are_evicted_and_active_ones_kept() {
        let store = SessionStore::new(Duration::from_secs(30));
        let idle = SessionId::new();
        let active = SessionId::new();
        store.get_or_create(idle);
        store.get_or_create(active);

        let later = Instant::now() + Duration::from_secs(31);
        store
            .get(active)
            .unwrap()
            .lock()
            .unwrap()
            .last_seen = later;

        assert_eq!(store.evict_idle(later), 1);
        assert!(store.get(idle).is_none());
        assert!(store.get(active).is_some());
    }
}
