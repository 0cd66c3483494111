use core::fmt;
use core::iter::FusedIterator;
#[cfg(target_has_atomic = "64")]
use core::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Source of every [`Ref`] handed out in this process.
///
/// Shared by all lists so a token from one list can never resolve in another.
/// Targets without 64-bit atomics fall back to a counter per list, where
/// tokens are only unique within the list that issued them.
#[cfg(target_has_atomic = "64")]
static NEXT_REF: AtomicU64 = AtomicU64::new(0);

/// An opaque handle to a node in a [`RefList`].
///
/// A `Ref` is never reused by the list that issued it, so a handle to a
/// deleted node stays dead even after new nodes are inserted. On targets with
/// 64-bit atomics it is also unique across every list in the process. It
/// carries no ordering meaning; only the list's links define order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ref(u64);


impl fmt::Debug for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref(#{})", self.0)
    }
}

/// A node in the list. Neighbours are stored as tokens, not pointers.
struct Node<T> {
    value: T,
    prev: Option<Ref>,
    next: Option<Ref>,
}

/// A doubly linked list whose elements are addressed by [`Ref`] tokens.
///
/// All nodes live in a single owned table keyed by their `Ref`. This gives
/// O(1) insertion next to any node and O(1) deletion of any node without
/// walking the list and without any `unsafe` pointer juggling.
///
/// # Examples
///
/// ```
/// use lfu_rs::list::RefList;
///
/// let mut list = RefList::new();
/// let b = list.append("b", None);
/// let a = list.prepend("a", Some(b));
/// list.append("c", Some(b));
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
/// assert!(list.delete(b));
/// assert!(!list.delete(b));
/// assert_eq!(list.next(a).and_then(|r| list.get(r)), Some(&"c"));
/// ```
pub struct RefList<T> {
    nodes: HashMap<Ref, Node<T>, DefaultHashBuilder>,
    head: Option<Ref>,
    tail: Option<Ref>,
    #[cfg(not(target_has_atomic = "64"))]
    next_ref: u64,
}

impl<T> RefList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        RefList {
            nodes: HashMap::with_hasher(DefaultHashBuilder::default()),
            head: None,
            tail: None,
            #[cfg(not(target_has_atomic = "64"))]
            next_ref: 0,
        }
    }

    /// Returns the number of values in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the reference of the first node.
    #[inline]
    pub fn head(&self) -> Option<Ref> {
        self.head
    }

    /// Returns the reference of the last node.
    #[inline]
    pub fn tail(&self) -> Option<Ref> {
        self.tail
    }

    /// Returns `true` if `node` refers to a live node of this list.
    #[inline]
    pub fn contains(&self, node: Ref) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Returns the value stored at `node`.
    #[inline]
    pub fn get(&self, node: Ref) -> Option<&T> {
        self.nodes.get(&node).map(|n| &n.value)
    }

    /// Returns a mutable reference to the value stored at `node`.
    #[inline]
    pub fn get_mut(&mut self, node: Ref) -> Option<&mut T> {
        self.nodes.get_mut(&node).map(|n| &mut n.value)
    }

    /// Returns the reference of the node before `node`.
    #[inline]
    pub fn prev(&self, node: Ref) -> Option<Ref> {
        self.nodes.get(&node).and_then(|n| n.prev)
    }

    /// Returns the reference of the node after `node`.
    #[inline]
    pub fn next(&self, node: Ref) -> Option<Ref> {
        self.nodes.get(&node).and_then(|n| n.next)
    }

    /// Inserts `value` right after `after`.
    ///
    /// When `after` is `None` or does not belong to this list the value goes
    /// to the tail.
    pub fn append(&mut self, value: T, after: Option<Ref>) -> Ref {
        let prev = after.filter(|r| self.nodes.contains_key(r)).or(self.tail);
        let next = prev.and_then(|p| self.next(p));
        self.link(value, prev, next)
    }

    /// Inserts `value` right before `before`.
    ///
    /// When `before` is `None` or does not belong to this list the value goes
    /// to the head.
    pub fn prepend(&mut self, value: T, before: Option<Ref>) -> Ref {
        let next = before.filter(|r| self.nodes.contains_key(r)).or(self.head);
        let prev = next.and_then(|n| self.prev(n));
        self.link(value, prev, next)
    }

    /// Unlinks `node` and returns its value.
    pub fn remove(&mut self, node: Ref) -> Option<T> {
        let Node { value, prev, next } = self.nodes.remove(&node)?;

        match prev.and_then(|p| self.nodes.get_mut(&p)) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.nodes.get_mut(&n)) {
            Some(n) => n.prev = prev,
            None => self.tail = prev,
        }

        Some(value)
    }

    /// Unlinks and drops `node`.
    ///
    /// Returns `false` if the reference is unknown; that is not an error.
    pub fn delete(&mut self, node: Ref) -> bool {
        self.remove(node).is_some()
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates over the values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    /// Allocates a fresh token and splices a node between `prev` and `next`.
    ///
    /// The caller guarantees `prev` and `next` are adjacent (or the list end).
    fn link(&mut self, value: T, prev: Option<Ref>, next: Option<Ref>) -> Ref {
        let node = self.fresh_ref();

        match prev.and_then(|p| self.nodes.get_mut(&p)) {
            Some(p) => p.next = Some(node),
            None => self.head = Some(node),
        }
        match next.and_then(|n| self.nodes.get_mut(&n)) {
            Some(n) => n.prev = Some(node),
            None => self.tail = Some(node),
        }

        self.nodes.insert(node, Node { value, prev, next });
        node
    }

    #[cfg(target_has_atomic = "64")]
    fn fresh_ref(&mut self) -> Ref {
        Ref(NEXT_REF.fetch_add(1, Ordering::Relaxed))
    }

    // `clear` keeps the counter so refs issued before it stay dead
    #[cfg(not(target_has_atomic = "64"))]
    fn fresh_ref(&mut self) -> Ref {
        let node = Ref(self.next_ref);
        self.next_ref += 1;
        node
    }
}

impl<T> Default for RefList<T> {
    fn default() -> Self {
        RefList::new()
    }
}

impl<T> FromIterator<T> for RefList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = RefList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for RefList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value, None);
        }
    }
}

impl<'a, T> IntoIterator for &'a RefList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for RefList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Head-to-tail iterator over a [`RefList`].
pub struct Iter<'a, T> {
    list: &'a RefList<T>,
    cursor: Option<Ref>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(&self.cursor?)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            list: self.list,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("cursor", &self.cursor)
            .field("remaining", &self.remaining)
            .finish()
    }
}
