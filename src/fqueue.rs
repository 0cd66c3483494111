//! Frequency Queue.
//!
//! Tracks an access count per key and hands back a least-frequent key in O(1).
//!
//! Keys are grouped into buckets, one per distinct frequency, and the buckets
//! are chained in a [`RefList`] in ascending frequency order:
//!
//! ```text
//!   order (RefList<Bucket<K>>)
//!   head ──► [freq 1: a, d] ◄──► [freq 2: b] ◄──► [freq 5: c] ◄── tail
//!              ▲                   ▲                ▲
//!   index (HashMap<K, Slot>)       │                │
//!     a ─► (bucket #1, member #7) ─┘ ...            │
//!     c ─► (bucket #4, member #9) ──────────────────┘
//! ```
//!
//! Each bucket's members are themselves a `RefList<K>`: keys join at the tail
//! and leave from the head, so within a tier the key that has been there the
//! longest is the one handed out first. The index stores both the bucket and
//! the member reference of every key, so promotion never scans.
//!
//! Invariants kept after every operation:
//!
//! - bucket frequencies strictly increase from head to tail;
//! - no bucket is empty;
//! - every key is a member of exactly the bucket its index slot names.

use crate::list::{self, Ref, RefList};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// All keys that have been pushed exactly `frequency` times.
struct Bucket<K> {
    frequency: usize,
    members: RefList<K>,
}

impl<K> Bucket<K> {
    fn new(frequency: usize) -> Self {
        Bucket {
            frequency,
            members: RefList::new(),
        }
    }
}

/// Where a key lives: its bucket in the chain and its node inside that bucket.
#[derive(Clone, Copy, Debug)]
struct Slot {
    bucket: Ref,
    member: Ref,
}

/// A queue that orders keys by how often they were pushed.
///
/// # Examples
///
/// ```
/// use lfu_rs::fqueue::FrequencyQueue;
///
/// let mut queue = FrequencyQueue::new();
/// queue.push("a");
/// queue.push("b");
/// queue.push("a");
///
/// assert_eq!(queue.frequency("a"), Some(2));
/// assert_eq!(queue.peek(), Some(&"b"));
/// assert_eq!(queue.pop(), Some("b"));
/// assert_eq!(queue.pop(), Some("a"));
/// assert_eq!(queue.pop(), None);
/// ```
pub struct FrequencyQueue<K, S = DefaultHashBuilder> {
    order: RefList<Bucket<K>>,
    index: HashMap<K, Slot, S>,
}

impl<K: Hash + Eq> FrequencyQueue<K> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        FrequencyQueue::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, S: BuildHasher> FrequencyQueue<K, S> {
    /// Creates an empty queue that hashes keys with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        FrequencyQueue {
            order: RefList::new(),
            index: HashMap::with_hasher(hash_builder),
        }
    }

    /// Returns the number of tracked keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no key is tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `key` is tracked.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(key)
    }

    /// Returns how many times `key` has been pushed.
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.index.get(key)?;
        self.frequency_at(slot.bucket)
    }

    /// Returns the lowest frequency currently tracked.
    #[inline]
    pub fn min_frequency(&self) -> Option<usize> {
        self.frequency_at(self.order.head()?)
    }

    /// Returns the highest frequency currently tracked.
    #[inline]
    pub fn max_frequency(&self) -> Option<usize> {
        self.frequency_at(self.order.tail()?)
    }

    /// Records an access to `key` and returns its new frequency.
    ///
    /// A key seen for the first time starts at frequency 1. A known key moves
    /// from its bucket to the one for the next frequency, joining that tier
    /// as its most recent member.
    pub fn push(&mut self, key: K) -> usize
    where
        K: Clone,
    {
        if let Some(frequency) = self.touch(&key) {
            return frequency;
        }
        self.insert(key)
    }

    /// Promotes an already tracked key by one frequency step.
    ///
    /// Returns the new frequency, or `None` without side effects when the key
    /// is not tracked.
    pub fn touch<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = *self.index.get(key)?;

        let bucket = self.order.get_mut(slot.bucket)?;
        let frequency = bucket.frequency;
        let owned = bucket.members.remove(slot.member)?;
        let emptied = bucket.members.is_empty();

        // The next tier either already follows this bucket or is opened right
        // after it, before the old bucket is retired.
        let promoted = frequency + 1;
        let target = match self.order.next(slot.bucket) {
            Some(next) if self.frequency_at(next) == Some(promoted) => next,
            _ => self
                .order
                .append(Bucket::new(promoted), Some(slot.bucket)),
        };
        if emptied {
            self.order.delete(slot.bucket);
        }

        let member = self.join(target, owned)?;
        if let Some(entry) = self.index.get_mut(key) {
            *entry = Slot {
                bucket: target,
                member,
            };
        }
        Some(promoted)
    }

    /// Removes and returns the least frequent key.
    ///
    /// Among keys of equal frequency, the one that entered that tier first is
    /// returned.
    pub fn pop(&mut self) -> Option<K> {
        let head = self.order.head()?;
        let bucket = self.order.get_mut(head)?;
        let first = bucket.members.head()?;
        let key = bucket.members.remove(first)?;
        if bucket.members.is_empty() {
            self.order.delete(head);
        }
        self.index.remove(&key);
        Some(key)
    }

    /// Returns the key [`pop`](Self::pop) would remove, without removing it.
    pub fn peek(&self) -> Option<&K> {
        let bucket = self.order.get(self.order.head()?)?;
        bucket.members.get(bucket.members.head()?)
    }

    /// Stops tracking `key`. Returns `false` if it was not tracked.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(slot) = self.index.remove(key) else {
            return false;
        };
        if let Some(bucket) = self.order.get_mut(slot.bucket) {
            bucket.members.delete(slot.member);
            if bucket.members.is_empty() {
                self.order.delete(slot.bucket);
            }
        }
        true
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }

    /// Iterates over the keys in pop order: ascending frequency, then the
    /// order in which they entered their tier.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            buckets: self.order.iter(),
            members: None,
            remaining: self.len(),
        }
    }

    /// Iterates over `(frequency, key count)` for each live tier, lowest
    /// frequency first.
    pub fn tiers(&self) -> Tiers<'_, K> {
        Tiers {
            buckets: self.order.iter(),
        }
    }

    fn insert(&mut self, key: K) -> usize
    where
        K: Clone,
    {
        let bucket = match self.order.head() {
            Some(head) if self.frequency_at(head) == Some(1) => head,
            _ => self.order.prepend(Bucket::new(1), None),
        };
        if let Some(member) = self.join(bucket, key.clone()) {
            self.index.insert(key, Slot { bucket, member });
        }
        1
    }

    /// Appends `key` as the newest member of `bucket`.
    fn join(&mut self, bucket: Ref, key: K) -> Option<Ref> {
        let bucket = self.order.get_mut(bucket)?;
        Some(bucket.members.append(key, None))
    }

    #[inline]
    fn frequency_at(&self, bucket: Ref) -> Option<usize> {
        self.order.get(bucket).map(|b| b.frequency)
    }
}

impl<K: Hash + Eq, S: BuildHasher + Default> Default for FrequencyQueue<K, S> {
    fn default() -> Self {
        FrequencyQueue::with_hasher(S::default())
    }
}

impl<K: Hash + Eq + Clone, S: BuildHasher + Default> FromIterator<K> for FrequencyQueue<K, S> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut queue = FrequencyQueue::default();
        queue.extend(iter);
        queue
    }
}

impl<K: Hash + Eq + Clone, S: BuildHasher> Extend<K> for FrequencyQueue<K, S> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.push(key);
        }
    }
}

impl<'a, K: Hash + Eq, S: BuildHasher> IntoIterator for &'a FrequencyQueue<K, S> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, S> fmt::Debug for FrequencyQueue<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.order.iter().map(|b| (b.frequency, &b.members)))
            .finish()
    }
}

/// Iterator over the keys of a [`FrequencyQueue`] in pop order.
pub struct Iter<'a, K> {
    buckets: list::Iter<'a, Bucket<K>>,
    members: Option<list::Iter<'a, K>>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(key) = self.members.as_mut().and_then(Iterator::next) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(key);
            }
            self.members = Some(self.buckets.next()?.members.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Iterator over the `(frequency, key count)` tiers of a [`FrequencyQueue`].
pub struct Tiers<'a, K> {
    buckets: list::Iter<'a, Bucket<K>>,
}

impl<K> Iterator for Tiers<'_, K> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.buckets
            .next()
            .map(|bucket| (bucket.frequency, bucket.members.len()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.buckets.size_hint()
    }
}

impl<K> ExactSizeIterator for Tiers<'_, K> {}

impl<K> fmt::Debug for Tiers<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tiers")
            .field("remaining", &self.buckets.len())
            .finish()
    }
}
