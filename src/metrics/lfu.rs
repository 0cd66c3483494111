//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache algorithm.

use super::{CacheMetrics, CoreCacheMetrics};
use crate::fqueue::FrequencyQueue;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::hash::{BuildHasher, Hash};

/// LFU-specific metrics (extends CoreCacheMetrics)
///
/// Tracks the frequency distribution of the cache on top of the core counters.
#[derive(Debug, Clone)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Current minimum frequency in the cache
    pub min_frequency: u64,

    /// Current maximum frequency in the cache
    pub max_frequency: u64,

    /// Total number of frequency increments (hits and overwrites)
    pub total_frequency_increments: u64,

    /// Frequency increments caused by a `set` overwriting a live key
    pub overwrite_frequency_increments: u64,

    /// Number of frequency tiers currently in use
    pub active_frequency_levels: u64,
}

impl LfuCacheMetrics {
    /// Creates metrics for a cache holding at most `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(capacity),
            min_frequency: 0,
            max_frequency: 0,
            total_frequency_increments: 0,
            overwrite_frequency_increments: 0,
            active_frequency_levels: 0,
        }
    }

    /// Records a key moving up to `new_frequency`.
    pub fn record_frequency_increment(&mut self, new_frequency: usize) {
        self.total_frequency_increments += 1;

        let new_frequency = new_frequency as u64;
        if new_frequency > self.max_frequency {
            self.max_frequency = new_frequency;
        }
    }

    /// Records a lookup hit that moved its key up to `new_frequency`.
    pub fn record_frequency_hit(&mut self, new_frequency: usize) {
        self.core.record_hit();
        self.record_frequency_increment(new_frequency);
    }

    /// Records an overwrite that moved its key up to `new_frequency`.
    ///
    /// Overwrites are not lookups, so they add no request or hit.
    pub fn record_frequency_overwrite(&mut self, new_frequency: usize) {
        self.core.record_update();
        self.overwrite_frequency_increments += 1;
        self.record_frequency_increment(new_frequency);
    }

    /// Records a lookup miss.
    pub fn record_miss(&mut self) {
        self.core.record_miss();
    }

    /// Re-reads the tier layout from the queue.
    pub fn update_frequency_levels<K, S>(&mut self, queue: &FrequencyQueue<K, S>)
    where
        K: Hash + Eq,
        S: BuildHasher,
    {
        self.active_frequency_levels = queue.tiers().len() as u64;
        self.min_frequency = queue.min_frequency().unwrap_or(0) as u64;
        self.max_frequency = queue.max_frequency().unwrap_or(0) as u64;
    }

    /// Average number of frequency increments per hit, overwrites excluded.
    pub fn average_frequency(&self) -> f64 {
        if self.core.cache_hits > 0 {
            let hit_increments =
                self.total_frequency_increments - self.overwrite_frequency_increments;
            hit_increments as f64 / self.core.cache_hits as f64
        } else {
            0.0
        }
    }

    /// Spread between the highest and lowest live frequency.
    pub fn frequency_range(&self) -> u64 {
        self.max_frequency.saturating_sub(self.min_frequency)
    }

    /// Converts LFU metrics to a sorted map for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert("min_frequency".to_string(), self.min_frequency as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert("frequency_range".to_string(), self.frequency_range() as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics.insert(
            "overwrite_frequency_increments".to_string(),
            self.overwrite_frequency_increments as f64,
        );
        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels as f64,
        );
        metrics.insert("average_frequency".to_string(), self.average_frequency());

        metrics
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
