//! Thread-safe LFU cache.
//!
//! [`SharedLfuCache`] wraps a single [`LfuCache`] in a `parking_lot::Mutex`.
//! Every operation takes the lock, so frequencies are tracked globally across
//! all threads and eviction decisions are identical to the single-threaded
//! cache fed the same sequence of operations.
//!
//! Reads need the lock too: a `get` promotes its key to the next frequency
//! tier, which is a write to the queue. A `RwLock` would buy nothing here.
//!
//! # Example
//!
//! ```rust
//! use lfu_rs::concurrent::SharedLfuCache;
//! use core::num::NonZeroUsize;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(SharedLfuCache::new(NonZeroUsize::new(1_000).unwrap()));
//!
//! let handles: Vec<_> = (0..4).map(|i| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for j in 0..100 {
//!             let key = format!("key-{}-{}", i, j);
//!             cache.set(key.clone(), j);
//!             if j % 10 == 0 {
//!                 for _ in 0..5 {
//!                     let _ = cache.get(&key);
//!                 }
//!             }
//!         }
//!     })
//! }).collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 400);
//! ```

use crate::config::LfuCacheConfig;
use crate::error::Result;
use crate::lfu::LfuCache;
use crate::metrics::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// An [`LfuCache`] behind a mutex, shareable across threads via `Arc`.
pub struct SharedLfuCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<LfuCache<K, V, S>>,
}

impl<K: Hash + Eq, V> SharedLfuCache<K, V> {
    /// Creates a new shared cache from a config and optional hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_rs::concurrent::SharedLfuCache;
    /// use lfu_rs::config::LfuCacheConfig;
    /// use core::num::NonZeroUsize;
    ///
    /// let config = LfuCacheConfig::new(NonZeroUsize::new(8).unwrap());
    /// let cache = SharedLfuCache::init(config, None);
    /// cache.set("k", 1);
    /// assert_eq!(cache.get("k"), Some(1));
    /// ```
    pub fn init(config: LfuCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        SharedLfuCache::from(LfuCache::init(config, hasher))
    }

    /// Creates a new shared cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> Self {
        SharedLfuCache::from(LfuCache::new(cap))
    }

    /// Creates a new shared cache from an unchecked integer capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        LfuCache::with_capacity(capacity).map(SharedLfuCache::from)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Clone> SharedLfuCache<K, V, S> {
    /// Creates a new shared cache that hashes keys with `hash_builder`.
    pub fn with_hasher(config: LfuCacheConfig, hash_builder: S) -> Self {
        SharedLfuCache::from(LfuCache::with_hasher(config, hash_builder))
    }

    /// Returns the maximum number of entries.
    pub fn cap(&self) -> NonZeroUsize {
        self.inner.lock().cap()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Stores `value` under `key`. See [`LfuCache::set`].
    pub fn set(&self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.inner.lock().set(key, value)
    }

    /// Gets a clone of the value and counts one access.
    ///
    /// For zero-copy access, use `get_with()` instead.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Counts one access and applies `f` to the value while holding the lock.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Gets a clone of the value without counting an access.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Returns `true` if the cache holds `key`. Does not count an access.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains_key(key)
    }

    /// Returns how many accesses have been counted for `key`.
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().frequency(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Calls `f` on every entry in eviction order while holding the lock.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.inner.lock().for_each(f);
    }

    /// Consumes the wrapper and returns the inner cache.
    pub fn into_inner(self) -> LfuCache<K, V, S> {
        self.inner.into_inner()
    }
}

impl<K, V, S> From<LfuCache<K, V, S>> for SharedLfuCache<K, V, S> {
    fn from(cache: LfuCache<K, V, S>) -> Self {
        SharedLfuCache {
            inner: Mutex::new(cache),
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Clone> CacheMetrics for SharedLfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "SharedLFU"
    }
}

impl<K, V, S> core::fmt::Debug for SharedLfuCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f.debug_struct("SharedLfuCache").field("inner", &*cache).finish(),
            None => f.debug_struct("SharedLfuCache").field("inner", &"<locked>").finish(),
        }
    }
}
