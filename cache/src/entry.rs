use crate::time;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A container for a value in the cache, holding all necessary metadata.
///
/// An entry is owned by exactly one cache. Overwriting a key installs a fresh
/// entry, so access history never carries over.
#[derive(Debug)]
pub(crate) struct CacheEntry<V> {
  /// The user's value, wrapped in an Arc for shared ownership.
  value: Arc<V>,
  /// Creation timestamp in nanoseconds since the cache epoch. Immutable.
  created_at: u64,
  /// Last successful read in nanoseconds since the cache epoch.
  last_accessed: AtomicU64,
  /// Starts at 1 and is bumped by every successful read.
  access_count: AtomicU64,
  /// TTL in nanoseconds, fixed at insertion and measured from `created_at`.
  /// Saturates at `u64::MAX`, which is never reached.
  ttl_nanos: Option<u64>,
  /// Monotonic insertion order within the owning cache. Used for tie-breaks.
  seq: u64,
}

impl<V> CacheEntry<V> {
  pub(crate) fn new(value: Arc<V>, ttl: Option<Duration>, seq: u64) -> Self {
    let now = time::now_nanos();
    Self {
      value,
      created_at: now,
      last_accessed: AtomicU64::new(now),
      access_count: AtomicU64::new(1),
      ttl_nanos: ttl.map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)),
      seq,
    }
  }

  /// Returns a clone of the `Arc` containing the value.
  #[inline]
  pub(crate) fn value(&self) -> Arc<V> {
    self.value.clone()
  }

  #[inline]
  pub(crate) fn created_at(&self) -> u64 {
    self.created_at
  }

  #[inline]
  pub(crate) fn last_accessed(&self) -> u64 {
    self.last_accessed.load(Ordering::Relaxed)
  }

  #[inline]
  pub(crate) fn access_count(&self) -> u64 {
    self.access_count.load(Ordering::Relaxed)
  }

  #[inline]
  pub(crate) fn seq(&self) -> u64 {
    self.seq
  }

  /// Records a successful read.
  ///
  /// `fetch_max` keeps `last_accessed` monotonic when two readers race.
  #[inline]
  pub(crate) fn touch(&self) {
    self.access_count.fetch_add(1, Ordering::Relaxed);
    self
      .last_accessed
      .fetch_max(time::now_nanos(), Ordering::Relaxed);
  }

  /// Checks the TTL against the current time.
  #[inline]
  pub(crate) fn is_expired(&self) -> bool {
    self.is_expired_at(time::now_nanos())
  }

  /// An entry is expired once strictly more than `ttl` has elapsed since creation.
  #[inline]
  pub(crate) fn is_expired_at(&self, now_nanos: u64) -> bool {
    match self.ttl_nanos {
      Some(ttl) => now_nanos.saturating_sub(self.created_at) > ttl,
      None => false,
    }
  }
}
