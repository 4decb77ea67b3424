//! Keyed read cache with request de-duplication.
//!
//! # Responsibility
//! - Serve repeated reads for one cache key from a single fetched value.
//! - Collapse concurrent fetches per key into one in-flight request.
//! - Drop exactly the entries a caller enumerates for invalidation.
//!
//! # Invariants
//! - At most one fetcher runs per key at a time; latecomers observe the
//!   value the winner stored.
//! - Invalidation removes entries; it never replaces them with new values.

use crate::model::crewmate::CrewmateId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Mutex as AsyncMutex;

/// Composite cache identifier: the entity plus an optional record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The full crewmate listing.
    List,
    /// One crewmate's detail read.
    Detail(CrewmateId),
}

type Slot<V> = Arc<AsyncMutex<Option<V>>>;

/// Read cache keyed by [`CacheKey`].
///
/// The outer map lock is held only to look up or drop a slot; fetch work
/// happens under the per-slot async lock, which is what serializes
/// concurrent fetches for one key without blocking other keys.
#[derive(Debug)]
pub struct QueryCache<V> {
    slots: Mutex<HashMap<CacheKey, Slot<V>>>,
}

impl<V: Clone> QueryCache<V> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key`, running `fetch` when absent.
    ///
    /// # Contract
    /// - Concurrent callers under one key share a single fetch.
    /// - The fetched value is cached as-is, including degraded fallbacks.
    pub async fn get_or_fetch<F, Fut>(&self, key: CacheKey, fetch: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let slot = self.slot(key);
        let mut guard = slot.lock().await;
        if let Some(value) = guard.as_ref() {
            return value.clone();
        }
        let value = fetch().await;
        *guard = Some(value.clone());
        value
    }

    /// Drops the enumerated entries so the next read re-fetches them.
    pub fn invalidate(&self, keys: &[CacheKey]) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            slots.remove(key);
        }
    }

    /// Returns the currently cached value for `key`, if any.
    ///
    /// Does not wait for an in-flight fetch; intended for inspection.
    pub fn cached(&self, key: &CacheKey) -> Option<V> {
        let slot = {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.get(key).cloned()
        }?;
        let guard = slot.try_lock().ok()?;
        guard.clone()
    }

    fn slot(&self, key: CacheKey) -> Slot<V> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .entry(key)
            .or_insert_with(|| Arc::new(AsyncMutex::new(None)))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{CacheKey, QueryCache};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_fetch(CacheKey::List, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                "rows".to_string()
            })
            .await;
        let second = cache
            .get_or_fetch(CacheKey::List, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                "other".to_string()
            })
            .await;

        assert_eq!(first, "rows");
        assert_eq!(second, "rows");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_fetch() {
        let cache = Arc::new(QueryCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_fetch(CacheKey::Detail(1), move || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::task::yield_now().await;
                            42_i64
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidation_drops_only_enumerated_keys() {
        let cache = QueryCache::new();
        cache.get_or_fetch(CacheKey::List, || async { 1 }).await;
        cache.get_or_fetch(CacheKey::Detail(7), || async { 2 }).await;

        cache.invalidate(&[CacheKey::List]);

        assert_eq!(cache.cached(&CacheKey::List), None);
        assert_eq!(cache.cached(&CacheKey::Detail(7)), Some(2));

        let refetched = cache.get_or_fetch(CacheKey::List, || async { 3 }).await;
        assert_eq!(refetched, 3);
    }
}
