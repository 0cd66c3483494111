//! Property Tests
//!
//! Drives the cache with generated operation sequences and checks it against a
//! brute-force model after every step. The model keeps an explicit
//! `(key, value, frequency, tier arrival)` table and finds the victim by
//! scanning, which is slow but obviously correct.

use lfu_rs::{FrequencyQueue, LfuCache};
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Set(u32, u64),
    Get(u32),
    Peek(u32),
    Remove(u32),
    Pop,
    Clear,
}

fn op_strategy(key_space: u32) -> impl Strategy<Value = Op> {
    prop_oneof![
        10 => (0..key_space, any::<u64>()).prop_map(|(k, v)| Op::Set(k, v)),
        8 => (0..key_space).prop_map(Op::Get),
        3 => (0..key_space).prop_map(Op::Peek),
        2 => (0..key_space).prop_map(Op::Remove),
        1 => Just(Op::Pop),
        1 => Just(Op::Clear),
    ]
}

#[derive(Default)]
struct Model {
    capacity: usize,
    clock: u64,
    /// key -> (value, frequency, time the key entered its current tier)
    entries: HashMap<u32, (u64, usize, u64)>,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Model {
            capacity,
            ..Default::default()
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn order(&self) -> Vec<u32> {
        let mut keys: Vec<_> = self.entries.iter().collect();
        keys.sort_by_key(|(_, (_, frequency, arrival))| (*frequency, *arrival));
        keys.into_iter().map(|(key, _)| *key).collect()
    }

    fn set(&mut self, key: u32, value: u64) -> Option<(u32, u64)> {
        let now = self.tick();
        if let Some(entry) = self.entries.get_mut(&key) {
            *entry = (value, entry.1 + 1, now);
            return None;
        }
        let evicted = if self.entries.len() >= self.capacity {
            self.pop()
        } else {
            None
        };
        self.entries.insert(key, (value, 1, now));
        evicted
    }

    fn get(&mut self, key: u32) -> Option<u64> {
        let now = self.tick();
        let entry = self.entries.get_mut(&key)?;
        entry.1 += 1;
        entry.2 = now;
        Some(entry.0)
    }

    fn pop(&mut self) -> Option<(u32, u64)> {
        let victim = *self.order().first()?;
        self.entries.remove(&victim).map(|(value, _, _)| (victim, value))
    }
}

fn check_against_model(cache: &LfuCache<u32, u64>, model: &Model) -> Result<(), TestCaseError> {
    prop_assert_eq!(cache.len(), model.entries.len());
    prop_assert!(cache.len() <= cache.cap().get());

    let order: Vec<u32> = cache.keys().copied().collect();
    prop_assert_eq!(order, model.order());

    for (key, (value, frequency, _)) in &model.entries {
        prop_assert_eq!(cache.peek(key), Some(value));
        prop_assert_eq!(cache.frequency(key), Some(*frequency));
    }
    Ok(())
}

proptest! {
    /// Every operation agrees with the model and leaves both in the same state.
    #[test]
    fn prop_cache_matches_model(
        capacity in 1usize..24,
        ops in prop::collection::vec(op_strategy(40), 0..400)
    ) {
        let mut cache = LfuCache::with_capacity(capacity).unwrap();
        let mut model = Model::new(capacity);

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    prop_assert_eq!(cache.set(k, v), model.set(k, v));
                }
                Op::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                }
                Op::Peek(k) => {
                    prop_assert_eq!(cache.peek(&k).copied(), model.entries.get(&k).map(|e| e.0));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(cache.remove(&k), model.entries.remove(&k).map(|e| e.0));
                }
                Op::Pop => {
                    prop_assert_eq!(cache.pop(), model.pop());
                }
                Op::Clear => {
                    cache.clear();
                    model.entries.clear();
                }
            }
            check_against_model(&cache, &model)?;
        }
    }

    /// Tiers stay strictly increasing, non-empty, and account for every key.
    #[test]
    fn prop_queue_tiers_strictly_increase(
        ops in prop::collection::vec((0u8..8, 0u64..50), 0..500)
    ) {
        let mut queue = FrequencyQueue::new();
        let mut counts: HashMap<u64, usize> = HashMap::new();

        for (op, key) in ops {
            if op == 0 {
                if let Some(popped) = queue.pop() {
                    let minimum = counts.values().copied().min();
                    prop_assert_eq!(counts.remove(&popped), minimum);
                }
            } else {
                let frequency = queue.push(key);
                let expected = counts.entry(key).or_insert(0);
                *expected += 1;
                prop_assert_eq!(frequency, *expected);
            }

            let tiers: Vec<(usize, usize)> = queue.tiers().collect();
            prop_assert!(tiers.windows(2).all(|pair| pair[0].0 < pair[1].0));
            prop_assert!(tiers.iter().all(|(_, members)| *members > 0));
            prop_assert_eq!(tiers.iter().map(|(_, members)| members).sum::<usize>(), queue.len());
            prop_assert_eq!(queue.len(), counts.len());
        }
    }
}
