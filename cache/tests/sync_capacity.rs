mod common;

use std::thread;

use common::{build_test_cache, IDLE_SWEEP, STEP};
use tiercache::{CacheBuilder, EvictionPolicy};

const POLICIES: [EvictionPolicy; 3] = [EvictionPolicy::Lru, EvictionPolicy::Lfu, EvictionPolicy::Ttl];

#[test]
fn test_sync_serial_inserts_never_exceed_capacity() {
  for policy in POLICIES {
    let cache = CacheBuilder::<u32, u32>::new()
      .capacity(10)
      .policy(policy)
      .sweep_interval(IDLE_SWEEP)
      .build()
      .unwrap();

    for i in 0..200 {
      cache.insert(i, i);
      assert!(cache.len() <= 10, "{policy}: len {} after insert {i}", cache.len());
    }
    assert_eq!(cache.len(), 10);
    assert_eq!(cache.metrics().evictions, 190);
  }
}

#[test]
fn test_sync_new_key_survives_its_own_eviction() {
  for policy in POLICIES {
    let cache = build_test_cache(2, policy);
    cache.insert("a", 1);
    cache.insert("b", 2);
    for _ in 0..5 {
      let _ = cache.get(&"a");
      let _ = cache.get(&"b");
    }

    cache.insert("c", 3);
    assert!(cache.contains_key(&"c"), "{policy}: fresh insert was evicted");
    assert_eq!(cache.len(), 2);
  }
}

#[test]
fn test_sync_lru_evicts_least_recently_touched() {
  let cache = build_test_cache(3, EvictionPolicy::Lru);
  cache.insert("a", 1);
  cache.insert("b", 2);
  cache.insert("c", 3);
  assert_eq!(cache.len(), 3, "no eviction at capacity");

  thread::sleep(STEP);
  assert!(cache.get(&"a").is_some());

  cache.insert("d", 4);

  assert_eq!(cache.len(), 3);
  assert!(!cache.contains_key(&"b"), "b should have been evicted");
  assert!(cache.contains_key(&"a"));
  assert!(cache.contains_key(&"c"));
  assert!(cache.contains_key(&"d"));
  assert_eq!(cache.metrics().evictions, 1);
}

#[test]
fn test_sync_lfu_evicts_least_frequently_used() {
  let cache = build_test_cache(2, EvictionPolicy::Lfu);
  cache.insert("a", 1);
  cache.insert("b", 2);
  for _ in 0..3 {
    assert!(cache.get(&"a").is_some());
  }
  assert!(cache.get(&"b").is_some());

  cache.insert("c", 3);

  assert_eq!(cache.len(), 2);
  assert!(!cache.contains_key(&"b"), "b has the lowest access count");
  assert!(cache.contains_key(&"a"));
  assert!(cache.contains_key(&"c"));
}

#[test]
fn test_sync_lfu_overwrite_resets_access_history() {
  let cache = build_test_cache(2, EvictionPolicy::Lfu);
  cache.insert("a", 1);
  cache.insert("b", 2);
  for _ in 0..5 {
    let _ = cache.get(&"a");
  }
  let _ = cache.get(&"b");

  // Replacing "a" discards its five reads.
  cache.insert("a", 10);
  cache.insert("c", 3);

  assert!(!cache.contains_key(&"a"));
  assert!(cache.contains_key(&"b"));
}

#[test]
fn test_sync_ttl_policy_prefers_expired_entries() {
  let cache = build_test_cache(2, EvictionPolicy::Ttl);
  cache.insert("forever", 1);
  thread::sleep(STEP);
  cache.insert_with_ttl("short", 2, std::time::Duration::from_millis(20));

  thread::sleep(std::time::Duration::from_millis(50));
  cache.insert("new", 3);

  assert!(cache.contains_key(&"forever"), "oldest entry kept while an expired one exists");
  assert!(!cache.contains_key(&"short"));
  assert_eq!(cache.metrics().evictions, 1);
}

#[test]
fn test_sync_ttl_policy_falls_back_to_oldest() {
  let cache = build_test_cache(2, EvictionPolicy::Ttl);
  cache.insert("old", 1);
  thread::sleep(STEP);
  cache.insert("young", 2);
  for _ in 0..10 {
    let _ = cache.get(&"old");
  }

  cache.insert("newest", 3);

  assert!(!cache.contains_key(&"old"), "reads do not protect against TTL eviction");
  assert!(cache.contains_key(&"young"));
  assert!(cache.contains_key(&"newest"));
}

#[test]
fn test_sync_capacity_one() {
  let cache = build_test_cache(1, EvictionPolicy::Lru);
  cache.insert("a", 1);
  cache.insert("b", 2);

  assert_eq!(cache.len(), 1);
  assert!(cache.get(&"a").is_none());
  assert_eq!(*cache.get(&"b").unwrap(), 2);
}
