#![no_std]
extern crate alloc;
extern crate lfu_rs;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::num::NonZeroUsize;
use lfu_rs::config::LfuCacheConfig;
use lfu_rs::{FrequencyQueue, LfuCache, RefList};

fn make_lfu<K: core::hash::Hash + Eq + Clone, V>(cap: usize) -> LfuCache<K, V> {
    let config = LfuCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LfuCache::init(config, None)
}

#[test]
fn test_lfu_in_no_std() {
    let mut cache = make_lfu(2);

    // Using String as it requires the alloc crate
    let key1 = String::from("key1");
    let key2 = String::from("key2");

    cache.set(key1.clone(), 1);
    cache.set(key2.clone(), 2);

    // Access key1 multiple times to increase its frequency
    cache.get(&key1);
    cache.get(&key1);

    // Add a new item, which should evict key2 (lower frequency)
    let key3 = String::from("key3");
    assert_eq!(cache.set(key3.clone(), 3), Some((key2.clone(), 2)));

    assert_eq!(*cache.get(&key1).unwrap(), 1);
    assert!(cache.get(&key2).is_none());
    assert_eq!(*cache.get(&key3).unwrap(), 3);
}

#[test]
fn test_frequency_queue_in_no_std() {
    let mut queue: FrequencyQueue<String> = FrequencyQueue::new();
    for i in 0..5 {
        for _ in 0..=i {
            queue.push(format!("key{}", i));
        }
    }

    assert_eq!(queue.len(), 5);
    assert_eq!(queue.tiers().len(), 5);
    assert_eq!(queue.pop().as_deref(), Some("key0"));
    assert_eq!(queue.frequency("key4"), Some(5));
}

#[test]
fn test_ref_list_in_no_std() {
    let mut list: RefList<String> = RefList::new();
    let middle = list.append(String::from("middle"), None);
    list.prepend(String::from("first"), Some(middle));
    list.append(String::from("last"), Some(middle));

    let joined: Vec<&str> = list.iter().map(String::as_str).collect();
    assert_eq!(joined, ["first", "middle", "last"]);
}

#[test]
fn test_complex_values_in_no_std() {
    #[derive(Debug, Clone, PartialEq)]
    struct ComplexValue {
        id: usize,
        name: String,
        data: Vec<u8>,
    }

    let mut cache = make_lfu(3);

    for i in 0..5usize {
        let value = ComplexValue {
            id: i,
            name: format!("item{}", i),
            data: Vec::from([i as u8; 4]),
        };
        cache.set(i, value);
    }

    assert_eq!(cache.len(), 3);
    let kept: Vec<usize> = cache.values().map(|v| v.id).collect();
    assert_eq!(kept, [2, 3, 4]);
    assert_eq!(cache.peek(&4).map(|v| v.name.as_str()), Some("item4"));
}
