//! Shared Cache Usage Example
//!
//! Several worker threads read through one [`SharedLfuCache`]. Because all
//! threads share a single frequency queue, keys that are popular across the
//! whole process stay cached even when each thread alone touches them rarely.
//!
//! Run with: cargo run --example shared_usage --features concurrent

use lfu_rs::concurrent::SharedLfuCache;
use lfu_rs::metrics::CacheMetrics;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

const WORKERS: u64 = 8;
const REQUESTS_PER_WORKER: u64 = 20_000;

fn main() {
    println!("Shared LFU Cache Usage");
    println!("======================\n");

    let cache: Arc<SharedLfuCache<u64, String>> =
        Arc::new(SharedLfuCache::new(NonZeroUsize::new(256).unwrap()));

    let start = Instant::now();
    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let mut loads = 0u64;
                for i in 0..REQUESTS_PER_WORKER {
                    // Every worker shares the same 64 hot keys plus its own long tail
                    let key = if i % 4 == 0 {
                        i % 64
                    } else {
                        1_000 + worker * REQUESTS_PER_WORKER + i
                    };
                    if cache.get_with(&key, |value| value.len()).is_none() {
                        cache.set(key, load(key));
                        loads += 1;
                    }
                }
                loads
            })
        })
        .collect();

    let loads: u64 = handles
        .into_iter()
        .map(|handle| handle.join().unwrap_or(0))
        .sum();
    let elapsed = start.elapsed();

    println!(
        "Served {} requests from {} threads in {:?}",
        WORKERS * REQUESTS_PER_WORKER,
        WORKERS,
        elapsed
    );
    println!("Backend loads: {loads}");

    let hot_cached = (0..64).filter(|key| cache.contains_key(key)).count();
    println!("Hot keys still cached: {hot_cached}/64");

    let metrics = cache.metrics();
    for key in ["hit_rate", "evictions", "max_frequency", "active_frequency_levels"] {
        if let Some(value) = metrics.get(key) {
            println!("  • {key}: {value:.2}");
        }
    }
}

fn load(key: u64) -> String {
    format!("payload for {key}")
}
