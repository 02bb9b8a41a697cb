use crate::entry::CacheEntry;

use core::fmt;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_utils::CachePadded;
use parking_lot::RwLock;

pub(crate) type ShardMap<K, V, H> = HashMap<K, Arc<CacheEntry<V>>, H>;

/// A helper function to hash a key using a `BuildHasher`.
#[inline]
pub(crate) fn hash_key<K: Hash + ?Sized, H: BuildHasher>(hasher: &H, key: &K) -> u64 {
  let mut state = hasher.build_hasher();
  key.hash(&mut state);
  state.finish()
}

/// A map partitioned into multiple, independently locked shards.
///
/// Point operations only ever lock the one shard that owns the key, so
/// operations on different keys rarely contend. The entry count is kept in an
/// atomic and is updated while the owning shard is write-locked.
pub(crate) struct ShardedStore<K, V, H> {
  shards: Box<[CachePadded<RwLock<ShardMap<K, V, H>>>]>,
  hasher: H,
  len: CachePadded<AtomicUsize>,
  next_seq: AtomicU64,
}

impl<K, V, H> fmt::Debug for ShardedStore<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ShardedStore")
      .field("num_shards", &self.shards.len())
      .field("len", &self.len.load(Ordering::Relaxed))
      .finish()
  }
}

impl<K, V, H> ShardedStore<K, V, H> {
  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.len.load(Ordering::Acquire)
  }
}

impl<K, V, H> ShardedStore<K, V, H>
where
  K: Eq + Hash,
  H: BuildHasher + Clone,
{
  /// Creates a new `ShardedStore` with the specified number of shards and hasher.
  pub(crate) fn new(num_shards: usize, hasher: H) -> Self {
    let mut shards = Vec::with_capacity(num_shards);
    for _ in 0..num_shards {
      let shard_map = HashMap::with_hasher(hasher.clone());
      shards.push(CachePadded::new(RwLock::new(shard_map)));
    }

    Self {
      shards: shards.into_boxed_slice(),
      hasher,
      len: CachePadded::new(AtomicUsize::new(0)),
      next_seq: AtomicU64::new(0),
    }
  }

  /// Returns the lock guarding the shard for a given key.
  #[inline]
  pub(crate) fn get_shard(&self, key: &K) -> &RwLock<ShardMap<K, V, H>> {
    let hash = hash_key(&self.hasher, key);
    // Never zero: the builder clamps the shard count to at least one.
    let index = hash as usize % self.shards.len();
    &self.shards[index]
  }

  /// Returns an iterator over all the shard locks.
  /// This is useful for whole-map passes like `clear()` or the expiry sweep.
  pub(crate) fn iter_shards(&self) -> impl Iterator<Item = &RwLock<ShardMap<K, V, H>>> {
    self.shards.iter().map(|padded_lock| &**padded_lock)
  }

  /// Hands out the next insertion sequence number.
  #[inline]
  pub(crate) fn next_seq(&self) -> u64 {
    self.next_seq.fetch_add(1, Ordering::Relaxed)
  }

  /// Inserts or replaces the entry for `key`, returning the displaced entry.
  pub(crate) fn insert(&self, key: K, entry: Arc<CacheEntry<V>>) -> Option<Arc<CacheEntry<V>>> {
    let mut guard = self.get_shard(&key).write();
    let old = guard.insert(key, entry);
    if old.is_none() {
      self.len.fetch_add(1, Ordering::AcqRel);
    }
    old
  }

  /// Removes the entry for `key`, if any.
  pub(crate) fn remove(&self, key: &K) -> Option<Arc<CacheEntry<V>>> {
    let mut guard = self.get_shard(key).write();
    let removed = guard.remove(key);
    if removed.is_some() {
      self.len.fetch_sub(1, Ordering::AcqRel);
    }
    removed
  }

  /// Removes the entry for `key` only if it is still exactly `expected`.
  ///
  /// A concurrent `insert` on the same key installs a new `Arc`, in which
  /// case the fresh entry is left alone.
  pub(crate) fn remove_if_same(&self, key: &K, expected: &Arc<CacheEntry<V>>) -> bool {
    let mut guard = self.get_shard(key).write();
    match guard.get(key) {
      Some(current) if Arc::ptr_eq(current, expected) => {
        guard.remove(key);
        self.len.fetch_sub(1, Ordering::AcqRel);
        true
      }
      _ => false,
    }
  }

  /// Drops every entry whose TTL has lapsed at `now_nanos`. Returns how many went.
  pub(crate) fn remove_expired(&self, now_nanos: u64) -> usize {
    let mut removed = 0;
    for shard in self.iter_shards() {
      let mut guard = shard.write();
      let before = guard.len();
      guard.retain(|_, entry| !entry.is_expired_at(now_nanos));
      let dropped = before - guard.len();
      if dropped > 0 {
        self.len.fetch_sub(dropped, Ordering::AcqRel);
        removed += dropped;
      }
    }
    removed
  }

  /// Removes every entry, one shard at a time.
  pub(crate) fn clear(&self) {
    for shard in self.iter_shards() {
      let mut guard = shard.write();
      let dropped = guard.len();
      guard.clear();
      self.len.fetch_sub(dropped, Ordering::AcqRel);
    }
  }
}

impl<K, V, H> ShardedStore<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher + Clone,
{
  /// Copies out every `(key, entry)` pair, read-locking one shard at a time.
  pub(crate) fn snapshot(&self) -> Vec<(K, Arc<CacheEntry<V>>)> {
    let mut out = Vec::with_capacity(self.len());
    for shard in self.iter_shards() {
      let guard = shard.read();
      out.extend(guard.iter().map(|(k, e)| (k.clone(), Arc::clone(e))));
    }
    out
  }
}
