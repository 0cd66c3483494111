//! Cache Metrics System
//!
//! Counters for cache activity, reported through the [`CacheMetrics`] trait as
//! a `BTreeMap<String, f64>`.
//!
//! A `BTreeMap` keeps the metric names in a fixed, sorted order, so two
//! reports of the same cache state print identically and can be diffed.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lfu;

pub use lfu::LfuCacheMetrics;

/// Counters shared by every cache policy.
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`) made against the cache
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of new keys stored
    pub insertions: u64,

    /// Number of `set` calls that overwrote an existing key
    pub updates: u64,

    /// Number of entries dropped to make room for a new key
    pub evictions: u64,

    /// Number of entries dropped by an explicit `remove` or `pop`
    pub removals: u64,

    /// Number of entries currently held
    pub entries: u64,

    /// Maximum number of entries the cache may hold
    pub capacity: u64,
}

impl CoreCacheMetrics {
    /// Creates an empty set of counters for a cache holding `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find its key.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new key being stored.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
        self.entries += 1;
    }

    /// Records an existing key being overwritten.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an entry dropped for capacity.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
        self.entries = self.entries.saturating_sub(1);
    }

    /// Records an entry dropped on request.
    pub fn record_removal(&mut self) {
        self.removals += 1;
        self.entries = self.entries.saturating_sub(1);
    }

    /// Records the cache being emptied. Lifetime counters are kept.
    pub fn record_clear(&mut self) {
        self.entries = 0;
    }

    /// Fraction of lookups that hit, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, or 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of the capacity currently in use.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.entries as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a sorted map for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics.insert("entries".to_string(), self.entries as f64);
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("utilization".to_string(), self.utilization());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Uniform access to the metrics of a cache.
pub trait CacheMetrics {
    /// Returns all metrics as name/value pairs in sorted order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name of the eviction policy, e.g. `"LFU"`.
    fn algorithm_name(&self) -> &'static str;
}
