mod common;

use common::build_test_cache;
use tiercache::EvictionPolicy;

#[test]
fn test_sync_insert_and_get() {
  let cache = build_test_cache(10, EvictionPolicy::Lru);
  cache.insert("key1", 100);

  assert_eq!(*cache.get(&"key1").unwrap(), 100);
  assert!(cache.get(&"missing").is_none());

  let metrics = cache.metrics();
  assert_eq!(metrics.hits, 1);
  assert_eq!(metrics.misses, 1);
  assert_eq!(cache.len(), 1);
}

#[test]
fn test_sync_overwrite_does_not_grow_count() {
  let cache = build_test_cache(10, EvictionPolicy::Lru);
  cache.insert("a", 1);
  cache.insert("a", 2);

  assert_eq!(cache.len(), 1);
  assert_eq!(*cache.get(&"a").unwrap(), 2);
}

#[test]
fn test_sync_invalidate_reports_presence() {
  let cache = build_test_cache(10, EvictionPolicy::Lru);
  cache.insert("a", 1);

  assert!(cache.invalidate(&"a"));
  assert!(!cache.invalidate(&"a"), "second removal is a no-op");
  assert!(cache.get(&"a").is_none());
  assert!(cache.is_empty());

  // Removal has no stats effect beyond the miss recorded by the get above.
  let metrics = cache.metrics();
  assert_eq!(metrics.hits, 0);
  assert_eq!(metrics.misses, 1);
  assert_eq!(metrics.evictions, 0);
}

#[test]
fn test_sync_hits_plus_misses_equals_lookups() {
  let cache = build_test_cache(4, EvictionPolicy::Lfu);
  let keys = ["a", "b", "c", "d", "e", "f"];
  let mut lookups = 0;

  for (i, key) in keys.iter().enumerate() {
    cache.insert(*key, i as i32);
    for probe in keys.iter().take(i + 1) {
      let _ = cache.get(probe);
      lookups += 1;
    }
  }

  let stats = cache.stats();
  assert_eq!(stats.hits() + stats.misses(), lookups);
}

#[test]
fn test_sync_clear_does_not_reset_stats() {
  let cache = build_test_cache(10, EvictionPolicy::Lru);
  cache.insert("a", 1);
  cache.insert("b", 2);
  let _ = cache.get(&"a");
  let _ = cache.get(&"a");
  let _ = cache.get(&"zzz");

  cache.clear();

  assert_eq!(cache.len(), 0);
  assert!(cache.get(&"a").is_none());
  let stats = cache.stats();
  assert_eq!(stats.hits(), 2, "clear must not reset hits");
  // Two misses: the one before clear and the lookup right after it.
  assert_eq!(stats.misses(), 2, "clear must not reset misses");
}

#[test]
fn test_sync_stats_handle_is_live() {
  let cache = build_test_cache(10, EvictionPolicy::Lru);
  let stats = cache.stats();
  assert_eq!(stats.hits(), 0);

  cache.insert("a", 1);
  let _ = cache.get(&"a");
  let _ = cache.get(&"b");

  assert_eq!(stats.hits(), 1);
  assert_eq!(stats.misses(), 1);
  assert!((stats.hit_ratio() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_sync_peek_and_contains_do_not_touch() {
  let cache = build_test_cache(10, EvictionPolicy::Lru);
  cache.insert("a", 1);

  assert_eq!(*cache.peek(&"a").unwrap(), 1);
  assert!(cache.peek(&"b").is_none());
  assert!(cache.contains_key(&"a"));
  assert!(!cache.contains_key(&"b"));

  let metrics = cache.metrics();
  assert_eq!(metrics.hits, 0);
  assert_eq!(metrics.misses, 0);
}

#[test]
fn test_sync_clone_shares_entries() {
  let cache = build_test_cache(10, EvictionPolicy::Lru);
  let other = cache.clone();
  other.insert("a", 7);

  assert_eq!(*cache.get(&"a").unwrap(), 7);
  assert_eq!(other.metrics().hits, 1);
}

#[test]
fn test_sync_non_clone_values() {
  struct NotClone(String);

  let cache = tiercache::CacheBuilder::<u32, NotClone>::new()
    .capacity(2)
    .build()
    .unwrap();
  cache.insert(1, NotClone("one".to_string()));

  let value = cache.get(&1).unwrap();
  assert_eq!(value.0, "one");
}
