//! In-memory estimate sessions.
//!
//! Each session holds one `CostEstimate` keyed by a random id. Sessions idle
//! for longer than the TTL are treated as gone and are swept whenever a new
//! session is created. Nothing is persisted.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::domain::CostEstimate;

struct Session {
    estimate: CostEstimate,
    last_used: Instant,
}

impl Session {
    fn is_live(&self, ttl: Duration) -> bool {
        self.last_used.elapsed() < ttl
    }
}

/// Shared session store, cheap to clone.
#[derive(Clone)]
pub struct EstimateStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl EstimateStore {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Opens a session, empty or with one default line item.
    pub fn create(&self, empty: bool) -> Uuid {
        let purged = self.purge_expired();
        if purged > 0 {
            tracing::debug!(purged, "Purged idle estimate sessions");
        }

        let estimate = if empty {
            CostEstimate::new()
        } else {
            CostEstimate::with_default_item()
        };
        let id = Uuid::new_v4();
        self.inner.write().insert(
            id,
            Session {
                estimate,
                last_used: Instant::now(),
            },
        );
        id
    }

    /// Snapshot of the session's estimate; refreshes its idle timer.
    pub fn get(&self, id: Uuid) -> Option<CostEstimate> {
        self.with_estimate_mut(id, |estimate| estimate.clone())
    }

    /// Runs `f` against the session's estimate under the write lock.
    pub fn with_estimate_mut<R>(&self, id: Uuid, f: impl FnOnce(&mut CostEstimate) -> R) -> Option<R> {
        let mut sessions = self.inner.write();
        let session = sessions.get_mut(&id).filter(|s| s.is_live(self.ttl))?;
        session.last_used = Instant::now();
        Some(f(&mut session.estimate))
    }

    /// Ends a session. Returns whether a live one existed.
    pub fn end(&self, id: Uuid) -> bool {
        self.inner
            .write()
            .remove(&id)
            .is_some_and(|s| s.is_live(self.ttl))
    }

    pub fn purge_expired(&self) -> usize {
        let mut sessions = self.inner.write();
        let before = sessions.len();
        sessions.retain(|_, s| s.is_live(self.ttl));
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }
}
