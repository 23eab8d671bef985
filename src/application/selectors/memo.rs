//! Memoization keyed on explicit dependencies.
//!
//! Selectors list what they depend on in their key type (channel, post
//! version, timestamps, preference flags). A changed dependency produces a
//! different key and therefore a recomputation; an unchanged one is a hit.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use tracing::trace;

/// Default number of entries each selector keeps.
pub const DEFAULT_MEMO_CAPACITY: usize = 32;

/// LRU cache of derived values.
pub struct MemoCache<K, V> {
    name: &'static str,
    cache: Mutex<LruCache<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> MemoCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    #[must_use]
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            name,
            cache: Mutex::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// The lock is not held while `compute` runs.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.cache.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(selector = self.name, "memo hit");
            return value.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(selector = self.name, "memo miss");
        let value = compute();
        self.cache.lock().put(key, value.clone());
        value
    }

    /// Drops every cached value.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    #[must_use]
    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.cache.lock().len(),
        }
    }
}

impl<K, V> std::fmt::Debug for MemoCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache")
            .field("name", &self.name)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Hit and miss counters of a [`MemoCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_same_key_computes_once() {
        let cache: MemoCache<(String, u64), usize> = MemoCache::new("test", 4);
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            7
        };

        assert_eq!(cache.get_or_compute(("c1".into(), 1), compute), 7);
        assert_eq!(cache.get_or_compute(("c1".into(), 1), compute), 7);

        assert_eq!(calls.get(), 1);
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.size), (1, 1, 1));
    }

    #[test]
    fn test_changed_dependency_recomputes() {
        let cache: MemoCache<(String, u64), u64> = MemoCache::new("test", 4);

        assert_eq!(cache.get_or_compute(("c1".into(), 1), || 1), 1);
        assert_eq!(cache.get_or_compute(("c1".into(), 2), || 2), 2);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let cache: MemoCache<u32, u32> = MemoCache::new("test", 2);
        cache.get_or_compute(1, || 1);
        cache.get_or_compute(2, || 2);
        cache.get_or_compute(3, || 3);

        assert_eq!(cache.stats().size, 2);
        assert_eq!(cache.get_or_compute(1, || 100), 100);
    }

    #[test]
    fn test_zero_capacity_still_caches_one() {
        let cache: MemoCache<u32, u32> = MemoCache::new("test", 0);
        cache.get_or_compute(1, || 1);
        assert_eq!(cache.get_or_compute(1, || 2), 1);
        cache.clear();
        assert_eq!(cache.stats().size, 0);
    }
}
