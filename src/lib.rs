#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! The crate is built from three layers, each usable on its own:
//!
//! | Type | Role |
//! |------|------|
//! | [`RefList`] | Doubly linked list whose nodes are addressed by stable [`Ref`] tokens |
//! | [`FrequencyQueue`] | Keys grouped into ascending frequency tiers, O(1) promote and pop |
//! | [`LfuCache`] | Bounded key-value cache evicting the least frequently used entry |
//!
//! ```text
//! LfuCache
//!  ├── HashMap<K, V>                 values
//!  └── FrequencyQueue<K>             access counts
//!       ├── HashMap<K, Slot>         key ──▶ (bucket ref, member ref)
//!       └── RefList<Bucket>          buckets in ascending frequency
//!            └── RefList<K>          members in arrival order
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `set`     | O(1) average |
//! | `get`     | O(1) average |
//! | `remove`  | O(1) average |
//! | `pop`     | O(1) average |
//! | `iter`    | O(n) |
//!
//! ## Reference List
//!
//! ```rust
//! use lfu_rs::RefList;
//!
//! let mut list = RefList::new();
//! let b = list.append("b", None);
//! list.prepend("a", Some(b));
//! list.append("c", Some(b));
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
//! assert_eq!(list.remove(b), Some("b"));
//! assert!(!list.contains(b));
//! ```
//!
//! ## Frequency Queue
//!
//! ```rust
//! use lfu_rs::FrequencyQueue;
//!
//! let mut queue = FrequencyQueue::new();
//! queue.push("a");
//! queue.push("b");
//! queue.push("a");
//!
//! assert_eq!(queue.frequency(&"a"), Some(2));
//! assert_eq!(queue.pop(), Some("b"));
//! assert_eq!(queue.pop(), Some("a"));
//! ```
//!
//! ## LFU Cache
//!
//! ```rust
//! use lfu_rs::LfuCache;
//! use lfu_rs::config::LfuCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LfuCacheConfig {
//!     capacity: NonZeroUsize::new(3).unwrap(),
//! };
//! let mut cache = LfuCache::init(config, None);
//!
//! cache.set("hot", 1);
//! cache.set("warm", 2);
//! cache.set("cold", 3);
//!
//! for _ in 0..5 {
//!     cache.get(&"hot");
//! }
//! cache.get(&"warm");
//!
//! assert_eq!(cache.set("new", 4), Some(("cold", 3)));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `hashbrown` | ✓ | Use hashbrown for `no_std` hash tables |
//! | `std` | | Mark the build as std-enabled |
//! | `concurrent` | | [`SharedLfuCache`](concurrent::SharedLfuCache), an `LfuCache` behind a `parking_lot` mutex |
//! | `nightly` | | Nightly-only hashbrown optimizations |

#![no_std]
#![forbid(unsafe_code)]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

extern crate alloc;

/// Doubly linked list addressed by stable node tokens.
pub mod list;

/// Keys grouped by access count in ascending frequency tiers.
pub mod fqueue;

/// Least Frequently Used (LFU) cache.
pub mod lfu;

/// Cache configuration.
pub mod config;

/// Error type.
pub mod error;

/// Cache activity counters.
pub mod metrics;

/// Mutex-wrapped cache for sharing across threads.
#[cfg(feature = "concurrent")]
#[cfg_attr(docsrs, doc(cfg(feature = "concurrent")))]
pub mod concurrent;

pub use config::LfuCacheConfig;
pub use error::{Error, Result};
pub use fqueue::FrequencyQueue;
pub use lfu::LfuCache;
pub use list::{Ref, RefList};
pub use metrics::CacheMetrics;
