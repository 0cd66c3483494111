//! Configuration for the LFU cache.
//!
//! Configuration structs have public fields for simple instantiation. The
//! capacity is a [`NonZeroUsize`], so a config built from the struct literal
//! is valid by construction. Capacities that arrive as plain integers (from a
//! settings file, a CLI flag, another service) go through
//! [`LfuCacheConfig::try_new`] or `TryFrom<usize>`, which reject zero with
//! [`Error::InvalidConfiguration`].
//!
//! # Examples
//!
//! ```
//! use lfu_rs::config::LfuCacheConfig;
//! use lfu_rs::LfuCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LfuCacheConfig {
//!     capacity: NonZeroUsize::new(100).unwrap(),
//! };
//! let cache: LfuCache<String, i32> = LfuCache::init(config, None);
//! assert_eq!(cache.cap().get(), 100);
//!
//! assert!(LfuCacheConfig::try_new(0).is_err());
//! ```

use crate::error::{Error, Result};
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold
    pub capacity: NonZeroUsize,
}

impl LfuCacheConfig {
    /// Creates a config holding at most `capacity` entries.
    pub const fn new(capacity: NonZeroUsize) -> Self {
        LfuCacheConfig { capacity }
    }

    /// Creates a config from an unchecked integer capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self> {
        match NonZeroUsize::new(capacity) {
            Some(capacity) => Ok(LfuCacheConfig::new(capacity)),
            None => {
                tracing::debug!(capacity, "rejected cache configuration");
                Err(Error::InvalidConfiguration(
                    "capacity must be greater than zero",
                ))
            }
        }
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl TryFrom<usize> for LfuCacheConfig {
    type Error = Error;

    fn try_from(capacity: usize) -> Result<Self> {
        LfuCacheConfig::try_new(capacity)
    }
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
