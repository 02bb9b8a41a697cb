use crate::entry::CacheEntry;
use crate::metrics::CacheStats;
use crate::policy::{Candidate, EvictionPolicy, VictimSelector};
use crate::store::ShardedStore;
use crate::task::janitor::Janitor;
use crate::time;

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

/// The internal, thread-safe core of the cache.
pub(crate) struct CacheShared<K, V, H> {
  pub(crate) store: Arc<ShardedStore<K, V, H>>,
  pub(crate) stats: Arc<CacheStats>,
  pub(crate) policy: EvictionPolicy,
  pub(crate) capacity: usize,
  pub(crate) time_to_live: Option<Duration>,
  pub(crate) sweep_interval: Duration,
  /// Held only while a victim is selected and removed. Point operations never take it.
  pub(crate) eviction_lock: Mutex<()>,
  pub(crate) janitor: Option<Janitor>,
}

impl<K, V, H> fmt::Debug for CacheShared<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheShared")
      .field("capacity", &self.capacity)
      .field("policy", &self.policy)
      .field("time_to_live", &self.time_to_live)
      .field("sweep_interval", &self.sweep_interval)
      .field("stats", &self.stats.snapshot())
      .finish_non_exhaustive()
  }
}

impl<K, V, H> Drop for CacheShared<K, V, H> {
  fn drop(&mut self) {
    if let Some(janitor) = self.janitor.take() {
      janitor.stop();
    }
  }
}

impl<K, V, H> CacheShared<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher + Clone,
{
  /// Evicts at most one entry if the store holds more than `capacity`.
  ///
  /// `just_written` is left out of the candidate set unless it is the only
  /// entry, so a fresh insert is never its own victim.
  pub(crate) fn evict_if_over_capacity(&self, just_written: Option<&K>) {
    if self.store.len() <= self.capacity {
      return;
    }

    let _guard = self.eviction_lock.lock();
    // Another writer may have evicted while we waited for the lock.
    if self.store.len() <= self.capacity {
      return;
    }

    let now = time::now_nanos();
    let mut snapshot = self.store.snapshot();
    if let Some(protected) = just_written {
      if snapshot.len() > 1 {
        snapshot.retain(|(key, _)| key != protected);
      }
    }

    let candidates: Vec<Candidate<K>> = snapshot
      .iter()
      .map(|(key, entry)| candidate(key, entry, now))
      .collect();

    let Some(victim) = self.policy.select(&candidates) else {
      return;
    };
    let Some(index) = candidates.iter().position(|c| std::ptr::eq(c, victim)) else {
      return;
    };

    let (key, entry) = &snapshot[index];
    if self.store.remove_if_same(key, entry) {
      self.stats.record_evictions(1);
      tracing::debug!(
        policy = %self.policy,
        len = self.store.len(),
        capacity = self.capacity,
        "evicted one entry over capacity"
      );
    }
  }
}

fn candidate<K: Clone, V>(key: &K, entry: &CacheEntry<V>, now: u64) -> Candidate<K> {
  Candidate {
    key: key.clone(),
    created_at: entry.created_at(),
    last_accessed: entry.last_accessed(),
    access_count: entry.access_count(),
    expired: entry.is_expired_at(now),
    seq: entry.seq(),
  }
}
