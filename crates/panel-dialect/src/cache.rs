//! Time-boxed dialect cache keyed by organization id.
//!
//! Readers see a whole `Arc<Dialect>` or nothing. A burst of misses for the
//! same organization triggers a single store fetch: the first caller loads
//! while the others wait on a per-key guard and then read the fresh entry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};

use crate::config::DialectConfig;
use crate::defaults::{default_config, global_default};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::overlay::{DialectOverlay, merge_with_default};

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// External configuration store holding organization overlays.
///
/// Timeouts and retries belong to the implementation.
pub trait DialectStore: Send + Sync {
    /// Fetch an organization's overlay; `Ok(None)` when it has none.
    fn fetch(&self, org_id: &str) -> Result<Option<DialectOverlay>>;
}

#[derive(Debug, Clone)]
struct CacheEntry {
    dialect: Arc<Dialect>,
    loaded_at: Instant,
}

/// Shared dialect cache.
#[derive(Debug)]
pub struct DialectCache {
    ttl: Duration,
    base: DialectConfig,
    entries: RwLock<HashMap<String, CacheEntry>>,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Default for DialectCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            base: default_config(),
            entries: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh cached dialect for an organization, if any.
    pub fn get(&self, org_id: &str) -> Option<Arc<Dialect>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(org_id)
            .filter(|entry| entry.loaded_at.elapsed() < self.ttl)
            .map(|entry| Arc::clone(&entry.dialect))
    }

    /// Resolve the dialect for an organization, loading it on a miss.
    ///
    /// `None` resolves to the global default without touching the store. An
    /// organization without an overlay also gets the default, and that answer
    /// is cached like any other.
    pub fn get_or_load(
        &self,
        org_id: Option<&str>,
        store: &dyn DialectStore,
    ) -> Result<Arc<Dialect>> {
        let Some(org_id) = org_id else {
            return Ok(global_default());
        };
        if let Some(dialect) = self.get(org_id) {
            tracing::trace!(org_id, "dialect cache hit");
            return Ok(dialect);
        }

        let guard = self.key_guard(org_id);
        let _loading = guard.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished loading while we waited.
        if let Some(dialect) = self.get(org_id) {
            self.release_key(org_id);
            return Ok(dialect);
        }

        tracing::debug!(org_id, "dialect cache miss, fetching from store");
        let loaded = store.fetch(org_id);
        let result = loaded.map(|overlay| {
            let dialect = match overlay {
                Some(mut overlay) => {
                    overlay.org_id = Some(org_id.to_string());
                    Arc::new(merge_with_default(&self.base, &overlay))
                }
                None => Arc::new(Dialect::new(Some(org_id.to_string()), self.base.clone())),
            };
            self.insert(org_id, Arc::clone(&dialect));
            dialect
        });
        if let Err(error) = &result {
            tracing::warn!(org_id, %error, "dialect store fetch failed");
        }
        self.release_key(org_id);
        result
    }

    /// Drop an organization's entry, e.g. after it edits its shortcodes.
    pub fn invalidate(&self, org_id: &str) {
        self.write_entries().remove(org_id);
    }

    pub fn clear(&self) {
        self.write_entries().clear();
    }

    /// Number of entries, including expired ones not yet replaced.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, org_id: &str, dialect: Arc<Dialect>) {
        self.write_entries().insert(
            org_id.to_string(),
            CacheEntry {
                dialect,
                loaded_at: Instant::now(),
            },
        );
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn key_guard(&self, org_id: &str) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(in_flight.entry(org_id.to_string()).or_default())
    }

    fn release_key(&self, org_id: &str) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        // Waiters still hold a clone; only the last one out removes the key.
        if in_flight
            .get(org_id)
            .is_some_and(|guard| Arc::strong_count(guard) <= 2)
        {
            in_flight.remove(org_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;
    use crate::error::DialectError;
    use panel_model::ServiceFamily;

    struct CountingStore {
        fetches: AtomicUsize,
    }

    impl DialectStore for CountingStore {
        fn fetch(&self, org_id: &str) -> Result<Option<DialectOverlay>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            match org_id {
                "acme" => Ok(Some(DialectOverlay::default().with_edge_alias("FULL", "2L2W"))),
                "broken" => Err(DialectError::Store {
                    org_id: org_id.to_string(),
                    message: "unavailable".to_string(),
                }),
                _ => Ok(None),
            }
        }
    }

    fn store() -> CountingStore {
        CountingStore {
            fetches: AtomicUsize::new(0),
        }
    }

    #[test]
    fn loads_once_and_serves_from_cache() {
        let cache = DialectCache::new();
        let store = store();
        let first = cache.get_or_load(Some("acme"), &store).unwrap();
        let second = cache.get_or_load(Some("acme"), &store).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(first.alias(ServiceFamily::EdgeBand, "full"), Some("2L2W"));
        assert_eq!(first.org_id(), Some("acme"));
    }

    #[test]
    fn concurrent_misses_fetch_once() {
        let cache = Arc::new(DialectCache::new());
        let store = Arc::new(store());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let store = Arc::clone(&store);
                thread::spawn(move || cache.get_or_load(Some("acme"), store.as_ref()).is_ok())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn invalidate_and_expiry_force_reload() {
        let cache = DialectCache::with_ttl(Duration::ZERO);
        let store = store();
        cache.get_or_load(Some("acme"), &store).unwrap();
        cache.get_or_load(Some("acme"), &store).unwrap();
        assert_eq!(store.fetches.load(Ordering::SeqCst), 2);

        let cache = DialectCache::new();
        let store = self::store();
        cache.get_or_load(Some("acme"), &store).unwrap();
        cache.invalidate("acme");
        assert!(cache.get("acme").is_none());
        cache.get_or_load(Some("acme"), &store).unwrap();
        assert_eq!(store.fetches.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn missing_org_and_no_org_use_default() {
        let cache = DialectCache::new();
        let store = store();
        let dialect = cache.get_or_load(Some("nobody"), &store).unwrap();
        assert_eq!(dialect.fingerprint(), global_default().fingerprint());
        let default = cache.get_or_load(None, &store).unwrap();
        assert!(default.org_id().is_none());
        assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn store_failure_is_reported_and_not_cached() {
        let cache = DialectCache::new();
        let store = store();
        let result = cache.get_or_load(Some("broken"), &store);
        assert!(matches!(result, Err(DialectError::Store { .. })));
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_recovers_a_poisoned_lock() {
        let cache = Arc::new(DialectCache::new());
        let store = store();
        cache.get_or_load(Some("acme"), &store).unwrap();

        let holder = Arc::clone(&cache);
        let panicked = thread::spawn(move || {
            let _entries = holder.entries.write().unwrap();
            panic!("writer panicked");
        })
        .join();
        assert!(panicked.is_err());
        assert!(cache.entries.is_poisoned());

        assert_eq!(cache.len(), 1);
        cache.invalidate("acme");
        assert!(cache.get("acme").is_none());
        cache.get_or_load(Some("acme"), &store).unwrap();
        assert_eq!(store.fetches.load(Ordering::SeqCst), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
