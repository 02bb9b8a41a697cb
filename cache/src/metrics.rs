use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crossbeam_utils::CachePadded;

/// Live hit/miss/eviction counters for a single cache instance.
///
/// Every counter only ever grows; `clear()` on the cache leaves them untouched.
/// The object returned by `Cache::stats()` is shared with the cache, so
/// values keep moving after the call. Use [`CacheStats::snapshot`] for a
/// consistent copy.
#[derive(Debug)]
pub struct CacheStats {
  pub(crate) hits: CachePadded<AtomicU64>,
  pub(crate) misses: CachePadded<AtomicU64>,
  pub(crate) evictions: CachePadded<AtomicU64>,
  created_at: Instant,
}

// Manual implementation of Default to handle the non-default `Instant`.
impl Default for CacheStats {
  fn default() -> Self {
    Self {
      hits: CachePadded::new(AtomicU64::new(0)),
      misses: CachePadded::new(AtomicU64::new(0)),
      evictions: CachePadded::new(AtomicU64::new(0)),
      created_at: Instant::now(),
    }
  }
}

impl CacheStats {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub(crate) fn record_hit(&self) {
    self.hits.fetch_add(1, Ordering::Relaxed);
  }

  #[inline]
  pub(crate) fn record_miss(&self) {
    self.misses.fetch_add(1, Ordering::Relaxed);
  }

  #[inline]
  pub(crate) fn record_evictions(&self, count: u64) {
    if count > 0 {
      self.evictions.fetch_add(count, Ordering::Relaxed);
    }
  }

  /// The number of successful lookups.
  pub fn hits(&self) -> u64 {
    self.hits.load(Ordering::Relaxed)
  }

  /// The number of failed lookups, including reads of expired entries.
  pub fn misses(&self) -> u64 {
    self.misses.load(Ordering::Relaxed)
  }

  /// The number of entries removed by capacity eviction or the expiry sweep.
  pub fn evictions(&self) -> u64 {
    self.evictions.load(Ordering::Relaxed)
  }

  /// `hits / (hits + misses)`, or `0.0` before the first lookup.
  pub fn hit_ratio(&self) -> f64 {
    ratio(self.hits(), self.misses())
  }

  /// Creates a point-in-time snapshot of the counters.
  pub fn snapshot(&self) -> StatsSnapshot {
    let hits = self.hits();
    let misses = self.misses();

    StatsSnapshot {
      hits,
      misses,
      evictions: self.evictions(),
      hit_ratio: ratio(hits, misses),
      uptime_secs: self.created_at.elapsed().as_secs(),
    }
  }
}

#[inline]
fn ratio(hits: u64, misses: u64) -> f64 {
  let total_lookups = hits + misses;
  if total_lookups == 0 {
    0.0
  } else {
    hits as f64 / total_lookups as f64
  }
}

/// A point-in-time, public-facing copy of a cache's statistics.
#[derive(Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
  /// The number of successful lookups.
  pub hits: u64,
  /// The number of failed lookups.
  pub misses: u64,
  /// The number of entries evicted by capacity or the expiry sweep.
  pub evictions: u64,
  /// The cache hit ratio (hits / (hits + misses)).
  pub hit_ratio: f64,
  /// The number of seconds the cache has been running.
  pub uptime_secs: u64,
}

impl fmt::Debug for StatsSnapshot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StatsSnapshot")
      .field("hits", &self.hits)
      .field("misses", &self.misses)
      .field("evictions", &self.evictions)
      .field("hit_ratio", &format!("{:.2}%", self.hit_ratio * 100.0))
      .field("uptime_secs", &self.uptime_secs)
      .finish()
  }
}
