//! Victim selection for capacity eviction.
//!
//! A selector looks at a snapshot of the cache's entries and names exactly one
//! victim. Selectors never touch the live map, which keeps them testable in
//! isolation from the concurrent store.
//!
//! All selectors break ties the same way: among candidates with an equal
//! ordering value, the one inserted first (lowest `seq`) loses.

pub mod lfu;
pub mod lru;
pub mod ttl;

use std::fmt;

/// A point-in-time view of one entry, as seen by a [`VictimSelector`].
///
/// Timestamps are nanoseconds on the cache's monotonic clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<K> {
  pub key: K,
  pub created_at: u64,
  pub last_accessed: u64,
  pub access_count: u64,
  /// Whether the entry's TTL had lapsed when the snapshot was taken.
  pub expired: bool,
  /// Insertion order within the owning cache.
  pub seq: u64,
}

/// Picks the entry to evict when a cache is over capacity.
pub trait VictimSelector {
  /// Returns the victim, or `None` if `candidates` is empty.
  fn select<'a, K>(&self, candidates: &'a [Candidate<K>]) -> Option<&'a Candidate<K>>;
}

/// The eviction policies a cache can be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EvictionPolicy {
  /// Evict the entry with the oldest last access.
  #[default]
  Lru,
  /// Evict the entry with the fewest accesses.
  Lfu,
  /// Evict an expired entry if there is one, else the oldest entry.
  Ttl,
}

impl VictimSelector for EvictionPolicy {
  fn select<'a, K>(&self, candidates: &'a [Candidate<K>]) -> Option<&'a Candidate<K>> {
    match self {
      EvictionPolicy::Lru => lru::Lru.select(candidates),
      EvictionPolicy::Lfu => lfu::Lfu.select(candidates),
      EvictionPolicy::Ttl => ttl::Ttl.select(candidates),
    }
  }
}

impl fmt::Display for EvictionPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EvictionPolicy::Lru => write!(f, "lru"),
      EvictionPolicy::Lfu => write!(f, "lfu"),
      EvictionPolicy::Ttl => write!(f, "ttl"),
    }
  }
}

/// Smallest `rank`, ties going to the lowest `seq`.
pub(crate) fn min_by_rank<K, F>(candidates: &[Candidate<K>], rank: F) -> Option<&Candidate<K>>
where
  F: Fn(&Candidate<K>) -> u64,
{
  candidates.iter().min_by_key(|&c| (rank(c), c.seq))
}
