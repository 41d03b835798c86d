//! # Address Issuance Cache
//!
//! Bounded LRU of issued records, keyed by the coordinate string.
//!
//! Strict LRU updates recency on every read, so reads mutate cache state
//! and the whole structure sits behind one exclusive lock.

use crate::codec::AddressInfo;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default cache capacity (entries).
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// LRU cache of issued addresses.
pub struct AddressCache {
    inner: Mutex<LruCache<String, Arc<AddressInfo>>>,
}

impl AddressCache {
    /// Cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Cache with a custom capacity (clamped to at least one entry).
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(cap)),
        }
    }

    /// Look up a record, marking it most recently used.
    pub fn get(&self, key: &str) -> Option<Arc<AddressInfo>> {
        self.inner.lock().get(key).cloned()
    }

    /// Store a record, evicting the least recently used entry when full.
    pub fn put(&self, key: String, info: Arc<AddressInfo>) {
        self.inner.lock().put(key, info);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Drop every entry.
    pub fn purge(&self) {
        self.inner.lock().clear();
    }
}

impl Default for AddressCache {
    fn default() -> Self {
        Self::new()
    }
}
