//! TTL memoization for idempotent async computations.
//!
//! A bounded LRU map guarded by a single mutex. Entries carry the instant
//! they were computed; a hit inside the TTL window returns the stored
//! value, anything older is recomputed and overwritten in place. The
//! computation runs outside the lock, so concurrent callers for the same
//! cold key may both compute; the map mutation itself is race-free and
//! the last writer wins. Failed computations are never stored.

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use lru::LruCache;

/// Time source for entry staleness, injectable for deterministic tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Entry<V> {
    value: V,
    computed_at: Instant,
}

/// Bounded TTL cache keyed by string.
pub struct TtlCache<V> {
    entries: Mutex<LruCache<String, Entry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self::with_clock(ttl, capacity, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            clock,
        }
    }

    /// Fresh value stored under `key`, if any. Stale entries are left in
    /// place for the next store to overwrite.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(e) if now.duration_since(e.computed_at) < self.ttl => Some(e.value.clone()),
            _ => None,
        }
    }

    /// Store `value` under `key`, overwriting any previous entry.
    pub fn insert(&self, key: &str, value: V) {
        let entry = Entry {
            value,
            computed_at: self.clock.now(),
        };
        self.entries.lock().unwrap().put(key.to_string(), entry);
    }

    /// Number of entries currently held, live or stale.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the fresh value for `key`, or run `compute` and store its
    /// result. The lock is never held across `compute`; an error
    /// propagates to the caller and leaves the cache untouched.
    pub async fn get_or_compute<F, Fut, E>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let value = compute().await?;
        self.insert(key, value.clone());
        Ok(value)
    }
}
