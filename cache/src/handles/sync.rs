use crate::entry::CacheEntry;
use crate::handles::KeyValueCache;
use crate::metrics::{CacheStats, StatsSnapshot};
use crate::policy::EvictionPolicy;
use crate::shared::CacheShared;
use crate::task::janitor;

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use std::time::Duration;

/// A thread-safe, bounded cache.
///
/// Point operations lock only the shard that owns the key. When an insert
/// pushes the entry count over capacity, one victim is picked by the
/// configured [`EvictionPolicy`] under a short exclusive eviction lock.
/// Concurrent inserts can overshoot the capacity briefly; the next insert
/// brings it back down.
///
/// Cloning a `Cache` yields another handle to the same entries. The
/// background janitor stops once the last handle is dropped or
/// [`Cache::shutdown`] is called.
pub struct Cache<K, V, H = ahash::RandomState> {
  pub(crate) shared: Arc<CacheShared<K, V, H>>,
}

impl<K, V, H> Clone for Cache<K, V, H> {
  fn clone(&self) -> Self {
    Self {
      shared: Arc::clone(&self.shared),
    }
  }
}

impl<K, V, H> fmt::Debug for Cache<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Cache")
      .field("shared", &self.shared)
      .finish()
  }
}

impl<K, V, H> Cache<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher + Clone,
{
  /// Fetches a value, returning a clone of its `Arc` on a hit.
  ///
  /// A hit bumps the entry's access count and last-access time. An expired
  /// entry is removed on the spot and counts as a miss, whether or not the
  /// janitor has swept yet.
  pub fn get(&self, key: &K) -> Option<Arc<V>> {
    let shard = self.shared.store.get_shard(key);

    let expired: Option<Arc<CacheEntry<V>>> = {
      let guard = shard.read();
      match guard.get(key) {
        Some(entry) if entry.is_expired() => Some(Arc::clone(entry)),
        Some(entry) => {
          entry.touch();
          self.shared.stats.record_hit();
          return Some(entry.value());
        }
        None => None,
      }
    }; // Read lock is dropped here.

    if let Some(entry) = expired {
      if self.shared.store.remove_if_same(key, &entry) {
        tracing::trace!("removed expired entry on read");
      }
    }
    self.shared.stats.record_miss();
    None
  }

  /// "Peeks" at a value without touching the entry or the statistics.
  pub fn peek(&self, key: &K) -> Option<Arc<V>> {
    let guard = self.shared.store.get_shard(key).read();
    guard
      .get(key)
      .filter(|entry| !entry.is_expired())
      .map(|entry| entry.value())
  }

  /// Whether `key` holds a live entry. Does not touch the entry or the statistics.
  pub fn contains_key(&self, key: &K) -> bool {
    let guard = self.shared.store.get_shard(key).read();
    guard.get(key).is_some_and(|entry| !entry.is_expired())
  }

  /// Inserts or replaces `key`, using the cache's default TTL if one is set.
  pub fn insert(&self, key: K, value: V) {
    self.insert_arc(key, Arc::new(value), None);
  }

  /// Inserts or replaces `key` with an explicit TTL, overriding the default.
  ///
  /// The TTL runs from insertion and is not renewed by reads.
  pub fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
    self.insert_arc(key, Arc::new(value), Some(ttl));
  }

  /// Shared insert path. Replacing a key installs a brand new entry, so
  /// access history never carries over.
  pub(crate) fn insert_arc(&self, key: K, value: Arc<V>, ttl: Option<Duration>) {
    let ttl = ttl.or(self.shared.time_to_live);
    let entry = Arc::new(CacheEntry::new(value, ttl, self.shared.store.next_seq()));

    self.shared.store.insert(key.clone(), entry);
    self.shared.evict_if_over_capacity(Some(&key));
  }

  /// Removes `key`. Returns `true` if an entry was present.
  pub fn invalidate(&self, key: &K) -> bool {
    self.shared.store.remove(key).is_some()
  }

  /// Removes every entry. Statistics are deliberately left as they are.
  pub fn clear(&self) {
    self.shared.store.clear();
  }

  /// Runs an expiry sweep now, on the calling thread. Returns how many
  /// entries were removed.
  pub fn sweep_expired(&self) -> usize {
    janitor::sweep_expired(&self.shared.store, &self.shared.stats)
  }
}

impl<K, V, H> Cache<K, V, H> {
  /// The number of entries, including expired ones not yet swept or read.
  pub fn len(&self) -> usize {
    self.shared.store.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn capacity(&self) -> usize {
    self.shared.capacity
  }

  pub fn policy(&self) -> EvictionPolicy {
    self.shared.policy
  }

  /// The default TTL applied by [`Cache::insert`], if any.
  pub fn time_to_live(&self) -> Option<Duration> {
    self.shared.time_to_live
  }

  /// Returns the live statistics object. Counters keep updating after the call.
  pub fn stats(&self) -> Arc<CacheStats> {
    Arc::clone(&self.shared.stats)
  }

  /// A point-in-time copy of the statistics.
  pub fn metrics(&self) -> StatsSnapshot {
    self.shared.stats.snapshot()
  }

  /// Stops the background janitor without waiting for an in-flight sweep.
  ///
  /// The cache stays fully usable. Expired entries are still dropped on read.
  pub fn shutdown(&self) {
    if let Some(janitor) = &self.shared.janitor {
      janitor.stop();
    }
  }
}

impl<K, V, H> KeyValueCache<K, V> for Cache<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher + Clone,
{
  fn get(&self, key: &K) -> Option<Arc<V>> {
    Cache::get(self, key)
  }

  fn insert(&self, key: K, value: V) {
    Cache::insert(self, key, value)
  }

  fn insert_with_ttl(&self, key: K, value: V, ttl: Duration) {
    Cache::insert_with_ttl(self, key, value, ttl)
  }

  fn invalidate(&self, key: &K) -> bool {
    Cache::invalidate(self, key)
  }

  fn len(&self) -> usize {
    Cache::len(self)
  }

  fn clear(&self) {
    Cache::clear(self)
  }
}
