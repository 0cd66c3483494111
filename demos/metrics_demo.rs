//! LFU Cache Metrics Demonstration
//!
//! Runs the same cache against a skewed and a uniform workload and prints the
//! core and frequency metrics side by side.
//!
//! Run with: cargo run --example metrics_demo

use lfu_rs::{config::LfuCacheConfig, metrics::CacheMetrics, LfuCache};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

const CAPACITY: usize = 32;
const OPERATIONS: u64 = 5_000;

fn main() {
    println!("📊 LFU Cache Metrics - Demonstration");
    println!("====================================\n");

    println!("   • Capacity: {CAPACITY} items");
    println!("   • Operations: {OPERATIONS} reads, misses are filled with a set");
    println!("   • Key space: 128 keys\n");

    let runs = [
        ("skewed", run_workload(|i| skewed_key(i, 128))),
        ("uniform", run_workload(|i| i.wrapping_mul(2654435761) % 128)),
    ];

    display_core_metrics(&runs);
    display_frequency_metrics(&runs);
    demonstrate_eviction_order();
}

/// Roughly Zipf-shaped: low keys are far more popular than high ones.
fn skewed_key(i: u64, key_space: u64) -> u64 {
    let spread = i.wrapping_mul(2654435761) % (key_space * key_space);
    let root = (spread as f64).sqrt() as u64;
    key_space - 1 - root.min(key_space - 1)
}

/// Read-through workload: every miss is followed by a set.
fn run_workload(next_key: impl Fn(u64) -> u64) -> LfuCache<u64, String> {
    let config = LfuCacheConfig {
        capacity: NonZeroUsize::new(CAPACITY).unwrap(),
    };
    let mut cache = LfuCache::init(config, None);

    for i in 0..OPERATIONS {
        let key = next_key(i);
        if cache.get(&key).is_none() {
            cache.set(key, format!("value-{key}"));
        }
    }
    cache
}

fn display_core_metrics(runs: &[(&str, LfuCache<u64, String>)]) {
    println!("📈 Core Performance Metrics:");
    println!(
        "{:<10} {:<8} {:<8} {:<10} {:<12} {:<8}",
        "Workload", "Hits", "Misses", "Evictions", "Hit Rate %", "Requests"
    );
    println!("{}", "-".repeat(60));

    for (name, cache) in runs {
        let metrics = cache.metrics();
        let hits = metrics.get("cache_hits").unwrap_or(&0.0);
        let misses = metrics.get("cache_misses").unwrap_or(&0.0);
        let requests = metrics.get("requests").unwrap_or(&0.0);
        let evictions = metrics.get("evictions").unwrap_or(&0.0);
        let hit_rate = metrics.get("hit_rate").unwrap_or(&0.0) * 100.0;

        println!(
            "{name:<10} {hits:<8.0} {misses:<8.0} {evictions:<10.0} {hit_rate:<12.1} {requests:<8.0}"
        );
    }
}

fn display_frequency_metrics(runs: &[(&str, LfuCache<u64, String>)]) {
    println!("\n🔍 Frequency Metrics:\n");

    for (name, cache) in runs {
        println!("{} workload ({}):", name, cache.algorithm_name());
        print_lfu_metrics(&cache.metrics());

        let hottest: Vec<String> = cache
            .keys()
            .skip(cache.len().saturating_sub(3))
            .map(|key| format!("{key}×{}", cache.frequency(key).unwrap_or(0)))
            .collect();
        println!("  • Hottest Keys: {}", hottest.join(", "));
        println!();
    }
}

fn print_lfu_metrics(metrics: &BTreeMap<String, f64>) {
    let keys = [
        "min_frequency",
        "max_frequency",
        "active_frequency_levels",
        "average_frequency",
    ];
    for key in &keys {
        if let Some(value) = metrics.get(*key) {
            println!("  • {}: {:.2}", key.replace('_', " "), value);
        }
    }
}

/// Walks a three-entry cache through a few sets and reads.
fn demonstrate_eviction_order() {
    println!("🔢 Eviction Order:");
    println!("==================\n");

    let mut cache = LfuCache::new(NonZeroUsize::new(3).unwrap());
    cache.set("apple", 1);
    cache.set("banana", 2);
    cache.set("cherry", 3);
    cache.get(&"apple");
    cache.get(&"apple");
    cache.get(&"banana");

    let order: Vec<String> = cache
        .iter()
        .map(|(key, _)| format!("{key}({})", cache.frequency(key).unwrap_or(0)))
        .collect();
    println!("  Tiers, coldest first: {}", order.join(" → "));

    if let Some((key, value)) = cache.set("date", 4) {
        println!("  Setting \"date\" evicted {key:?} = {value}");
    }
    println!("  Cache now holds {} of {} entries", cache.len(), cache.cap());
}
