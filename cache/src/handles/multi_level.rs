use crate::handles::{Cache, KeyValueCache};
use crate::metrics::CacheStats;

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use std::time::Duration;

/// A two-tier cache: a small, fast L1 in front of a larger L2.
///
/// Writes go through to both tiers. A read that misses L1 but hits L2
/// promotes the value into L1 with a plain insert, so L1 applies its own
/// eviction. There is no cross-tier transaction: a lost promotion is simply
/// redone on the next read.
pub struct MultiLevelCache<K, V, H = ahash::RandomState> {
  pub(crate) l1: Cache<K, V, H>,
  pub(crate) l2: Cache<K, V, H>,
}

/// The live statistics of both tiers. They are never merged.
#[derive(Debug, Clone)]
pub struct TieredStats {
  pub l1: Arc<CacheStats>,
  pub l2: Arc<CacheStats>,
}

impl<K, V, H> Clone for MultiLevelCache<K, V, H> {
  fn clone(&self) -> Self {
    Self {
      l1: self.l1.clone(),
      l2: self.l2.clone(),
    }
  }
}

impl<K, V, H> fmt::Debug for MultiLevelCache<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MultiLevelCache")
      .field("l1", &self.l1)
      .field("l2", &self.l2)
      .finish()
  }
}

impl<K, V, H> MultiLevelCache<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher + Clone,
{
  /// Reads L1, then L2. An L2 hit is promoted into L1 before returning.
  ///
  /// An L1 hit never touches L2. An L1 miss followed by an L2 hit records one
  /// miss in L1's stats and one hit in L2's.
  ///
  /// The promoted copy is a plain L1 insert: it takes L1's default TTL (none
  /// unless configured), not whatever TTL remains on the L2 entry. It can
  /// therefore outlive the L2 entry it came from.
  pub fn get(&self, key: &K) -> Option<Arc<V>> {
    if let Some(value) = self.l1.get(key) {
      return Some(value);
    }

    let value = self.l2.get(key)?;
    self.l1.insert_arc(key.clone(), Arc::clone(&value), None);
    tracing::trace!("promoted entry from L2 to L1");
    Some(value)
  }

  /// Writes to both tiers with their default TTLs.
  pub fn insert(&self, key: K, value: V) {
    self.write_through(key, Arc::new(value), None);
  }

  /// Writes to both tiers with an explicit TTL.
  pub fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
    self.write_through(key, Arc::new(value), Some(ttl));
  }

  fn write_through(&self, key: K, value: Arc<V>, ttl: Option<Duration>) {
    self.l1.insert_arc(key.clone(), Arc::clone(&value), ttl);
    self.l2.insert_arc(key, value, ttl);
  }

  /// Removes `key` from both tiers. Returns `true` if either tier held it.
  pub fn invalidate(&self, key: &K) -> bool {
    let from_l1 = self.l1.invalidate(key);
    let from_l2 = self.l2.invalidate(key);
    from_l1 || from_l2
  }

  /// Clears both tiers. Statistics are kept.
  pub fn clear(&self) {
    self.l1.clear();
    self.l2.clear();
  }
}

impl<K, V, H> MultiLevelCache<K, V, H> {
  /// `l1.len() + l2.len()`. A key held by both tiers is counted twice.
  pub fn len(&self) -> usize {
    self.l1.len() + self.l2.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The fast tier.
  pub fn l1(&self) -> &Cache<K, V, H> {
    &self.l1
  }

  /// The slow tier.
  pub fn l2(&self) -> &Cache<K, V, H> {
    &self.l2
  }

  pub fn stats(&self) -> TieredStats {
    TieredStats {
      l1: self.l1.stats(),
      l2: self.l2.stats(),
    }
  }

  /// Stops both tiers' janitors.
  pub fn shutdown(&self) {
    self.l1.shutdown();
    self.l2.shutdown();
  }
}

impl<K, V, H> KeyValueCache<K, V> for MultiLevelCache<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher + Clone,
{
  fn get(&self, key: &K) -> Option<Arc<V>> {
    MultiLevelCache::get(self, key)
  }

  fn insert(&self, key: K, value: V) {
    MultiLevelCache::insert(self, key, value)
  }

  fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
    MultiLevelCache::insert_with_ttl(self, key, value, ttl)
  }

  fn invalidate(&self, key: &K) -> bool {
    MultiLevelCache::invalidate(self, key)
  }

  fn len(&self) -> usize {
    MultiLevelCache::len(self)
  }

  fn clear(&self) {
    MultiLevelCache::clear(self)
  }
}
