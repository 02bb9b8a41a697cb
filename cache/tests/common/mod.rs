#![allow(dead_code)]

use std::time::Duration;

use tiercache::{Cache, CacheBuilder, EvictionPolicy, MultiLevelCache, MultiLevelCacheBuilder};

/// Long enough that the janitor never runs during a test unless asked to.
pub const IDLE_SWEEP: Duration = Duration::from_secs(3600);

/// A fast janitor tick for tests that wait on the background sweep.
pub const FAST_SWEEP: Duration = Duration::from_millis(10);

/// Gap between steps whose relative timestamps matter.
pub const STEP: Duration = Duration::from_millis(2);

// Helper to build a cache for testing purposes. A single shard keeps the
// candidate snapshot in one map.
pub fn build_test_cache(capacity: usize, policy: EvictionPolicy) -> Cache<&'static str, i32> {
  CacheBuilder::new()
    .capacity(capacity)
    .policy(policy)
    .shards(1)
    .sweep_interval(IDLE_SWEEP)
    .build()
    .unwrap()
}

pub fn build_test_multi_level(l1: usize, l2: usize) -> MultiLevelCache<&'static str, &'static str> {
  MultiLevelCacheBuilder::new()
    .l1_capacity(l1)
    .l2_capacity(l2)
    .sweep_interval(IDLE_SWEEP)
    .build()
    .unwrap()
}
