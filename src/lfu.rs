//! Least Frequently Used Cache Implementation.
//!
//! The LFU (Least Frequently Used) cache evicts the least frequently accessed
//! entry when a new key arrives at a full cache. Among entries with the same
//! access count, the one that reached that count first is evicted.
//!
//! Values live in a plain hash table. Access counts live in a
//! [`FrequencyQueue`], which keeps keys in ascending frequency tiers, so both
//! promotion and eviction are O(1).
//!
//! Every `set` counts as an access, including a `set` that overwrites an
//! existing key. `peek` reads without counting.

use crate::config::LfuCacheConfig;
use crate::error::Result;
use crate::fqueue::{self, FrequencyQueue};
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// An implementation of a Least Frequently Used (LFU) cache.
///
/// # Examples
///
/// ```
/// use lfu_rs::LfuCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LfuCache::new(NonZeroUsize::new(3).unwrap());
///
/// cache.set("a", 1);
/// cache.set("b", 2);
/// cache.set("c", 3);
///
/// // "a" is read twice, "b" once
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"b"), Some(&2));
///
/// // "c" has the lowest frequency and makes room for "d"
/// assert_eq!(cache.set("d", 4), Some(("c", 3)));
/// assert_eq!(cache.peek(&"c"), None);
/// ```
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    config: LfuCacheConfig,
    map: HashMap<K, V, S>,
    queue: FrequencyQueue<K, S>,
    metrics: LfuCacheMetrics,
}

impl<K: Hash + Eq, V> LfuCache<K, V> {
    /// Creates a new LFU cache from a config.
    ///
    /// `hasher` seeds both the value table and the frequency index; `None`
    /// uses a fresh default hasher. Other hasher types go through
    /// [`LfuCache::with_hasher`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_rs::LfuCache;
    /// use lfu_rs::config::LfuCacheConfig;
    /// use core::num::NonZeroUsize;
    ///
    /// let config = LfuCacheConfig {
    ///     capacity: NonZeroUsize::new(2).unwrap(),
    /// };
    /// let mut cache = LfuCache::init(config, None);
    /// cache.set("rare", 1);
    /// cache.set("popular", 2);
    ///
    /// for _ in 0..10 {
    ///     cache.get(&"popular");
    /// }
    ///
    /// cache.set("new", 3); // "rare" evicted (lowest frequency)
    /// assert!(cache.get(&"popular").is_some());
    /// assert!(cache.get(&"rare").is_none());
    /// ```
    pub fn init(config: LfuCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        LfuCache::with_hasher(config, hasher.unwrap_or_default())
    }

    /// Creates a new LFU cache holding at most `cap` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_rs::LfuCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let cache: LfuCache<&str, u32> = LfuCache::new(NonZeroUsize::new(10).unwrap());
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(cap: NonZeroUsize) -> Self {
        LfuCache::init(LfuCacheConfig::new(cap), None)
    }

    /// Creates a new LFU cache from an unchecked integer capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let config = LfuCacheConfig::try_new(capacity)?;
        Ok(LfuCache::init(config, None))
    }

    /// Creates a new LFU cache pre-filled with `entries`.
    ///
    /// Only the trailing `capacity` entries are kept; earlier ones are dropped
    /// as if they had never been inserted. The kept entries are stored in
    /// order, each starting at frequency 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_rs::LfuCache;
    ///
    /// let cache = LfuCache::with_entries(3, [(1, "one"), (2, "two"), (3, "three"), (4, "four")])?;
    /// assert_eq!(cache.keys().copied().collect::<Vec<_>>(), [2, 3, 4]);
    /// # Ok::<(), lfu_rs::Error>(())
    /// ```
    pub fn with_entries<I>(capacity: usize, entries: I) -> Result<Self>
    where
        K: Clone,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut cache = LfuCache::with_capacity(capacity)?;

        let entries: Vec<(K, V)> = entries.into_iter().collect();
        let dropped = entries.len().saturating_sub(capacity);
        if dropped > 0 {
            tracing::debug!(
                dropped,
                capacity,
                "initial entries exceed capacity, keeping the trailing ones"
            );
        }

        for (key, value) in entries.into_iter().skip(dropped) {
            cache.set(key, value);
        }
        Ok(cache)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Clone> LfuCache<K, V, S> {
    /// Creates a new LFU cache that hashes keys with `hash_builder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_rs::LfuCache;
    /// use lfu_rs::config::LfuCacheConfig;
    /// use core::num::NonZeroUsize;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let config = LfuCacheConfig::new(NonZeroUsize::new(10).unwrap());
    /// let cache: LfuCache<&str, u32, _> = LfuCache::with_hasher(config, RandomState::new());
    /// assert_eq!(cache.cap().get(), 10);
    /// ```
    pub fn with_hasher(config: LfuCacheConfig, hash_builder: S) -> Self {
        tracing::debug!(capacity = config.capacity().get(), "creating LFU cache");
        LfuCache {
            config,
            map: HashMap::with_hasher(hash_builder.clone()),
            queue: FrequencyQueue::with_hasher(hash_builder),
            metrics: LfuCacheMetrics::new(config.capacity().get() as u64),
        }
    }

    /// Returns the maximum number of key-value pairs the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity()
    }

    /// Returns the current number of key-value pairs in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache contains no key-value pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Stores `value` under `key` and counts one access to `key`.
    ///
    /// If `key` is new and the cache is full, the least frequently used entry
    /// is evicted first and returned. Overwriting an existing key never
    /// evicts; it replaces the value and raises the key's frequency.
    pub fn set(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if let Some(slot) = self.map.get_mut(&key) {
            *slot = value;
            let frequency = self.queue.push(key);
            self.metrics.record_frequency_overwrite(frequency);
            self.metrics.update_frequency_levels(&self.queue);
            return None;
        }

        let evicted = if self.map.len() >= self.cap().get() {
            self.evict()
        } else {
            None
        };

        self.map.insert(key.clone(), value);
        self.queue.push(key);
        self.metrics.core.record_insertion();
        self.metrics.update_frequency_levels(&self.queue);

        evicted
    }

    /// Returns a reference to the value of `key` and counts one access.
    ///
    /// The key may be any borrowed form of the cache's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type. A missing key has no effect on the cache.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.promote(key) {
            return None;
        }
        self.map.get(key)
    }

    /// Returns a mutable reference to the value of `key` and counts one access.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.promote(key) {
            return None;
        }
        self.map.get_mut(key)
    }

    /// Returns a reference to the value of `key` without counting an access.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key)
    }

    /// Returns `true` if the cache holds `key`. Does not count an access.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns how many accesses have been counted for `key`.
    #[inline]
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.queue.frequency(key)
    }

    /// Removes `key` from the cache, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let value = self.map.remove(key)?;
        self.queue.remove(key);
        self.metrics.core.record_removal();
        self.metrics.update_frequency_levels(&self.queue);
        Some(value)
    }

    /// Removes and returns the entry that would be evicted next.
    ///
    /// # Examples
    ///
    /// ```
    /// use lfu_rs::LfuCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let mut cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
    /// cache.set("a", 1);
    /// cache.set("b", 2);
    /// cache.get(&"a");
    ///
    /// assert_eq!(cache.pop(), Some(("b", 2)));
    /// ```
    pub fn pop(&mut self) -> Option<(K, V)> {
        let entry = self.take_least_frequent()?;
        self.metrics.core.record_removal();
        self.metrics.update_frequency_levels(&self.queue);
        Some(entry)
    }

    /// Clears the cache, removing all key-value pairs.
    pub fn clear(&mut self) {
        self.map.clear();
        self.queue.clear();
        self.metrics.core.record_clear();
        self.metrics.update_frequency_levels(&self.queue);
    }

    /// Iterates over the entries in eviction order: ascending frequency, then
    /// the order in which entries reached their frequency.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            keys: self.queue.iter(),
            map: &self.map,
        }
    }

    /// Iterates over the keys in eviction order.
    pub fn keys(&self) -> fqueue::Iter<'_, K> {
        self.queue.iter()
    }

    /// Iterates over the values in eviction order.
    pub fn values(&self) -> Values<'_, K, V, S> {
        Values { inner: self.iter() }
    }

    /// Calls `f` on every entry in eviction order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    /// Counts an access to `key` if present. Returns whether it was present.
    fn promote<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.queue.touch(key) {
            Some(frequency) => {
                self.metrics.record_frequency_hit(frequency);
                self.metrics.update_frequency_levels(&self.queue);
                true
            }
            None => {
                self.metrics.record_miss();
                false
            }
        }
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let frequency = self.queue.min_frequency();
        let entry = self.take_least_frequent()?;
        self.metrics.core.record_eviction();
        tracing::trace!(?frequency, len = self.map.len(), "evicted least frequently used entry");
        Some(entry)
    }

    fn take_least_frequent(&mut self) -> Option<(K, V)> {
        let key = self.queue.pop()?;
        let entry = self.map.remove_entry(&key);
        debug_assert!(entry.is_some(), "frequency queue and value table disagree");
        entry
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> Extend<(K, V)> for LfuCache<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher + Clone> IntoIterator for &'a LfuCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Clone> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for LfuCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.config.capacity())
            .field("len", &self.map.len())
            .field("min_frequency", &self.metrics.min_frequency)
            .finish()
    }
}

/// Iterator over the entries of an [`LfuCache`] in eviction order.
pub struct Iter<'a, K, V, S> {
    keys: fqueue::Iter<'a, K>,
    map: &'a HashMap<K, V, S>,
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let key = self.keys.next()?;
            if let Some(value) = self.map.get(key) {
                return Some((key, value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> FusedIterator for Iter<'_, K, V, S> {}

impl<K, V, S> fmt::Debug for Iter<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("keys", &self.keys).finish()
    }
}

/// Iterator over the values of an [`LfuCache`] in eviction order.
pub struct Values<'a, K, V, S> {
    inner: Iter<'a, K, V, S>,
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> Iterator for Values<'a, K, V, S> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> FusedIterator for Values<'_, K, V, S> {}

impl<K, V, S> fmt::Debug for Values<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values").field("inner", &self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::*;
    use crate::error::Error;
    use alloc::vec;

    fn make_lfu<K: Hash + Eq, V>(cap: usize) -> LfuCache<K, V> {
        LfuCache::new(NonZeroUsize::new(cap).unwrap())
    }

    /// The value table and the frequency queue must track the same keys.
    fn assert_consistent<K: Hash + Eq + fmt::Debug, V>(cache: &LfuCache<K, V>) {
        assert_eq!(cache.map.len(), cache.queue.len());
        assert!(cache.len() <= cache.cap().get());
        for key in cache.queue.iter() {
            assert!(cache.map.contains_key(key), "{:?} missing from table", key);
        }
    }

    #[test]
    fn test_lfu_basic() {
        let mut cache = make_lfu(3);

        assert_eq!(cache.set("a", 1), None);
        assert_eq!(cache.set("b", 2), None);
        assert_eq!(cache.set("c", 3), None);

        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"b"), Some(&2));

        // "c" is alone at frequency 1
        let evicted = cache.set("d", 4);
        assert_eq!(evicted, Some(("c", 3)));

        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"d"), Some(&4));
        assert_eq!(cache.get(&"c"), None);
        assert_consistent(&cache);
    }

    #[test]
    fn test_lfu_frequency_ordering() {
        let mut cache = make_lfu(2);

        cache.set("a", 1);
        cache.set("b", 2);

        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"b");

        let evicted = cache.set("c", 3);
        assert_eq!(evicted.unwrap().0, "b");

        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.get(&"b"), None);
    }

    #[test]
    fn test_lfu_update_existing_counts_as_access() {
        let mut cache = make_lfu(2);

        cache.set("a", 1);
        cache.get(&"a");
        assert_eq!(cache.frequency(&"a"), Some(2));

        // Overwrite bumps the frequency and never evicts
        assert_eq!(cache.set("a", 10), None);
        assert_eq!(cache.frequency(&"a"), Some(3));
        assert_eq!(cache.len(), 1);

        cache.set("b", 2);
        assert_eq!(cache.set("c", 3), Some(("b", 2)));

        assert_eq!(cache.get(&"a"), Some(&10));
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.get(&"b"), None);
    }

    #[test]
    fn test_lfu_overwrite_at_capacity_does_not_evict() {
        let mut cache = make_lfu(2);
        cache.set(1, "one");
        cache.set(2, "two");

        assert_eq!(cache.set(2, "TWO"), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(&1), Some(&"one"));
        assert_eq!(cache.peek(&2), Some(&"TWO"));
    }

    #[test]
    fn test_lfu_ties_break_by_arrival_in_tier() {
        let mut cache = make_lfu(3);
        cache.set("x", 0);
        cache.set("y", 0);
        cache.set("z", 0);

        // y then x reach frequency 2; z stays at 1
        cache.get(&"y");
        cache.get(&"x");
        assert_eq!(cache.set("w", 0), Some(("z", 0)));

        // w now holds frequency 1, then y before x at frequency 2
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), ["w", "y", "x"]);
        assert_eq!(cache.set("v", 0), Some(("w", 0)));
        cache.get(&"v");
        // v joins the frequency-2 tier behind y and x
        assert_eq!(cache.set("u", 0), Some(("y", 0)));
    }

    #[test]
    fn test_lfu_remove() {
        let mut cache = make_lfu(3);

        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);

        assert_eq!(cache.remove(&"b"), Some(2));
        assert_eq!(cache.remove(&"b"), None);

        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.len(), 2);
        assert_consistent(&cache);
    }

    #[test]
    fn test_lfu_pop() {
        let mut cache = make_lfu(3);
        assert_eq!(cache.pop(), None);

        cache.set("a", 1);
        cache.set("b", 2);
        cache.get(&"a");

        assert_eq!(cache.pop(), Some(("b", 2)));
        assert_eq!(cache.pop(), Some(("a", 1)));
        assert_eq!(cache.pop(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lfu_clear() {
        let mut cache = make_lfu(3);

        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);

        assert_eq!(cache.len(), 3);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.iter().count(), 0);

        cache.set("d", 4);
        assert_eq!(cache.get(&"d"), Some(&4));
        assert_eq!(cache.frequency(&"d"), Some(2));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lfu_get_mut() {
        let mut cache = make_lfu(2);

        cache.set("a", 1);

        if let Some(value) = cache.get_mut(&"a") {
            *value = 10;
        }

        assert_eq!(cache.frequency(&"a"), Some(2));
        assert_eq!(cache.get(&"a"), Some(&10));
        assert_eq!(cache.get_mut(&"missing"), None);
    }

    #[test]
    fn test_lfu_peek_does_not_count() {
        let mut cache = make_lfu(3);
        cache.set(1, "one");
        cache.set(2, "two");

        assert_eq!(cache.peek(&1), Some(&"one"));
        assert_eq!(cache.peek(&3), None);
        assert!(cache.contains_key(&2));
        assert_eq!(cache.frequency(&1), Some(1));
        assert_eq!(cache.values().copied().collect::<Vec<_>>(), ["one", "two"]);
    }

    #[test]
    fn test_lfu_get_missing_has_no_side_effect() {
        let mut cache = make_lfu(2);
        cache.set(1, 1);
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.frequency(&1), Some(1));
        assert_eq!(cache.frequency(&2), None);
    }

    #[test]
    fn test_lfu_borrowed_lookup() {
        let mut cache: LfuCache<String, usize> = make_lfu(2);
        cache.set("alpha".to_string(), 1);

        assert_eq!(cache.get("alpha"), Some(&1));
        assert_eq!(cache.peek("alpha"), Some(&1));
        assert_eq!(cache.frequency("alpha"), Some(2));
        assert_eq!(cache.remove("alpha"), Some(1));
    }

    #[test]
    fn test_lfu_complex_values() {
        let mut cache = make_lfu(2);

        #[derive(Debug, Clone, PartialEq)]
        struct ComplexValue {
            id: usize,
            data: String,
        }

        cache.set(
            "a",
            ComplexValue {
                id: 1,
                data: "a-data".to_string(),
            },
        );

        cache.set(
            "b",
            ComplexValue {
                id: 2,
                data: "b-data".to_string(),
            },
        );

        if let Some(value) = cache.get_mut(&"a") {
            value.id = 100;
            value.data = "a-modified".to_string();
        }

        let a = cache.get(&"a").unwrap();
        assert_eq!(a.id, 100);
        assert_eq!(a.data, "a-modified");
    }

    #[test]
    fn test_lfu_with_capacity_rejects_zero() {
        let result: Result<LfuCache<u32, u32>> = LfuCache::with_capacity(0);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));

        let result: Result<LfuCache<u32, u32>> = LfuCache::with_entries(0, vec![(1, 1)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_lfu_init_infers_default_hasher() {
        let mut cache = LfuCache::init(LfuCacheConfig::new(NonZeroUsize::new(2).unwrap()), None);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.get(&"a");
        assert_eq!(cache.set("c", 3), Some(("b", 2)));
        assert_consistent(&cache);
    }

    #[test]
    fn test_lfu_with_custom_hasher() {
        use core::hash::BuildHasherDefault;
        use std::collections::hash_map::DefaultHasher;

        let config = LfuCacheConfig::new(NonZeroUsize::new(2).unwrap());
        let mut cache: LfuCache<&str, i32, BuildHasherDefault<DefaultHasher>> =
            LfuCache::with_hasher(config, BuildHasherDefault::default());
        cache.set("a", 1);
        cache.set("b", 2);
        cache.get(&"b");
        assert_eq!(cache.set("c", 3), Some(("a", 1)));
        assert_eq!(cache.frequency(&"b"), Some(2));
        assert_eq!(cache.frequency(&"c"), Some(1));
    }

    #[test]
    fn test_lfu_with_entries_keeps_trailing() {
        let cache =
            LfuCache::with_entries(3, vec![(1, "one"), (2, "two"), (3, "three"), (4, "four")])
                .unwrap();

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.peek(&1), None);
        assert_eq!(
            cache.values().copied().collect::<Vec<_>>(),
            ["two", "three", "four"]
        );
        for key in [2, 3, 4] {
            assert_eq!(cache.frequency(&key), Some(1));
        }
        assert_consistent(&cache);
    }

    #[test]
    fn test_lfu_iteration_and_for_each() {
        let mut cache = make_lfu(3);
        cache.extend([(1, "one"), (2, "two"), (3, "three")]);
        cache.get(&1);

        let entries: Vec<(i32, &str)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, [(2, "two"), (3, "three"), (1, "one")]);

        let mut seen = Vec::new();
        cache.for_each(|key, value| seen.push((*key, *value)));
        assert_eq!(seen, entries);

        let mut count = 0;
        for _ in &cache {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn test_lfu_metrics() {
        let mut cache = make_lfu(2);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.get(&"a");
        cache.get(&"missing");
        cache.set("c", 3);

        let metrics = cache.metrics();
        assert_eq!(cache.algorithm_name(), "LFU");
        assert_eq!(metrics.get("requests"), Some(&2.0));
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(metrics.get("insertions"), Some(&3.0));
        assert_eq!(metrics.get("entries"), Some(&2.0));
        assert_eq!(metrics.get("active_frequency_levels"), Some(&2.0));
        assert_eq!(metrics.get("max_frequency"), Some(&2.0));
    }

    #[test]
    fn test_lfu_overwrites_are_not_hits() {
        let mut cache = make_lfu(2);
        cache.set("a", 1);
        cache.get(&"a");
        cache.set("a", 2);
        cache.set("a", 3);

        let metrics = cache.metrics();
        assert_eq!(cache.frequency(&"a"), Some(4));
        assert_eq!(metrics.get("requests"), Some(&1.0));
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("updates"), Some(&2.0));
        assert_eq!(metrics.get("total_frequency_increments"), Some(&3.0));
        assert_eq!(metrics.get("overwrite_frequency_increments"), Some(&2.0));
        assert_eq!(metrics.get("average_frequency"), Some(&1.0));
    }

    #[test]
    fn test_lfu_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LfuCache<String, Vec<u8>>>();
    }

    #[test]
    fn test_lfu_concurrent_access() {
        use std::sync::{Arc, Mutex};
        use std::thread;

        let cache = Arc::new(Mutex::new(make_lfu(100)));
        let num_threads = 4;
        let ops_per_thread = 100;

        let mut handles: Vec<std::thread::JoinHandle<()>> = Vec::new();

        for t in 0..num_threads {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("key_{}_{}", t, i);
                    let mut guard = cache.lock().unwrap();
                    guard.set(key.clone(), i);
                    if i % 3 == 0 {
                        let _ = guard.get(&key);
                        let _ = guard.get(&key);
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let guard = cache.lock().unwrap();
        assert!(guard.len() <= 100);
        assert_consistent(&guard);
    }
}
