use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Time-bounded memoization for computed analytics.
///
/// Sits outside the pure analytics functions: callers decide what to key on and
/// when to recompute. Expired entries are never returned; they are dropped lazily
/// on access or eagerly with [`TtlCache::purge_expired`].
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> std::fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .field("entries", &"<RwLock>")
            .finish()
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, entry: &Entry<V>) -> bool {
        entry.stored_at.elapsed() < self.ttl
    }

    /// Fresh value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        let guard = match self.entries.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::error!("TtlCache: Lock poisoned during read, recovering");
                poisoned.into_inner()
            }
        };
        guard
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        let entry = Entry {
            value,
            stored_at: Instant::now(),
        };
        match self.entries.write() {
            Ok(mut guard) => {
                guard.insert(key, entry);
            }
            Err(poisoned) => {
                tracing::error!("TtlCache: Lock poisoned during write, recovering");
                poisoned.into_inner().insert(key, entry);
            }
        }
    }

    /// Cached value, or compute, store and return a new one.
    ///
    /// The lock is not held while `compute` runs, so two callers racing on the
    /// same key may both compute; the later insert wins. Values are pure
    /// projections, so either is correct.
    pub fn get_or_insert_with<E>(
        &self,
        key: &K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(key) {
            tracing::debug!("TtlCache: hit for {:?}", key);
            return Ok(value);
        }

        tracing::debug!("TtlCache: miss for {:?}", key);
        let value = compute()?;
        self.insert(key.clone(), value.clone());
        Ok(value)
    }

    pub fn invalidate(&self, key: &K) -> bool {
        let mut guard = match self.entries.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.remove(key).is_some()
    }

    /// Drop expired entries, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut guard = match self.entries.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = guard.len();
        guard.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        let removed = before - guard.len();
        if removed > 0 {
            tracing::debug!("TtlCache: purged {} expired entries", removed);
        }
        removed
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(g) => g.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
