use crate::error::BuildError;
use crate::handles::{Cache, MultiLevelCache};
use crate::metrics::CacheStats;
use crate::policy::EvictionPolicy;
use crate::shared::CacheShared;
use crate::store::ShardedStore;
use crate::task::janitor::{Janitor, JanitorContext};

use core::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

/// The capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1024;

/// How often the janitor sweeps expired entries unless told otherwise.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Default L1 (fast, small) tier capacity for a [`MultiLevelCache`].
pub const DEFAULT_L1_CAPACITY: usize = 100;

/// Default L2 (slow, large) tier capacity for a [`MultiLevelCache`].
pub const DEFAULT_L2_CAPACITY: usize = 1000;

/// Upper bound on the shard count. Larger requests are clamped to it.
pub const MAX_SHARDS: usize = 1 << 16;

fn default_shards() -> usize {
  (num_cpus::get() * 4).clamp(1, MAX_SHARDS).next_power_of_two()
}

/// A builder for creating [`Cache`] instances.
pub struct CacheBuilder<K, V, H = ahash::RandomState> {
  pub(crate) capacity: usize,
  pub(crate) policy: EvictionPolicy,
  pub(crate) shards: usize,
  pub(crate) time_to_live: Option<Duration>,
  pub(crate) sweep_interval: Duration,
  pub(crate) hasher: H,
  _key_marker: PhantomData<K>,
  _value_marker: PhantomData<V>,
}

// Manual Debug implementation for CacheBuilder.
impl<K, V, H> fmt::Debug for CacheBuilder<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheBuilder")
      .field("capacity", &self.capacity)
      .field("policy", &self.policy)
      .field("shards", &self.shards)
      .field("time_to_live", &self.time_to_live)
      .field("sweep_interval", &self.sweep_interval)
      .finish_non_exhaustive()
  }
}

// --- General Configuration Methods ---
impl<K, V, H> CacheBuilder<K, V, H> {
  /// Sets the maximum number of entries. Must be greater than zero.
  pub fn capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity;
    self
  }

  /// Sets the policy used to pick a victim when the cache is over capacity.
  ///
  /// Defaults to [`EvictionPolicy::Lru`].
  pub fn policy(mut self, policy: EvictionPolicy) -> Self {
    self.policy = policy;
    self
  }

  /// Sets the number of concurrent shards to use.
  ///
  /// Clamped to `1..=MAX_SHARDS`, then rounded up to a power of two.
  pub fn shards(mut self, shards: usize) -> Self {
    self.shards = shards.clamp(1, MAX_SHARDS).next_power_of_two();
    self
  }

  /// Sets the default time-to-live applied by `insert`.
  ///
  /// Entries inserted with an explicit TTL keep their own.
  pub fn time_to_live(mut self, duration: Duration) -> Self {
    self.time_to_live = Some(duration);
    self
  }

  /// Sets how often the background janitor sweeps out expired entries.
  ///
  /// Defaults to 60 seconds. Expired entries are also dropped lazily on read,
  /// so this only bounds how long unread garbage lingers.
  pub fn sweep_interval(mut self, interval: Duration) -> Self {
    self.sweep_interval = interval;
    self
  }
}

// --- Default Constructor ---
impl<K, V, H: BuildHasher + Default> CacheBuilder<K, V, H> {
  /// Creates a new `CacheBuilder` with default settings.
  pub fn new() -> Self {
    Self {
      capacity: DEFAULT_CAPACITY,
      policy: EvictionPolicy::default(),
      shards: default_shards(),
      time_to_live: None,
      sweep_interval: DEFAULT_SWEEP_INTERVAL,
      hasher: H::default(),
      _key_marker: PhantomData,
      _value_marker: PhantomData,
    }
  }

  /// Creates a builder pre-populated from a deserialized [`CacheConfig`].
  ///
  /// [`CacheConfig`]: crate::config::CacheConfig
  #[cfg(feature = "serde")]
  pub fn from_config(config: &crate::config::CacheConfig) -> Self {
    let mut builder = Self::new()
      .capacity(config.capacity)
      .policy(config.policy)
      .sweep_interval(config.sweep_interval);
    if let Some(ttl) = config.time_to_live {
      builder = builder.time_to_live(ttl);
    }
    if let Some(shards) = config.shards {
      builder = builder.shards(shards);
    }
    builder
  }
}

impl<K, V> Default for CacheBuilder<K, V, ahash::RandomState> {
  fn default() -> Self {
    Self::new()
  }
}

// --- Build Methods ---
impl<K, V, H> CacheBuilder<K, V, H>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Send + Sync + 'static,
  H: BuildHasher + Clone + Send + Sync + 'static,
{
  /// Sets the hasher for the cache.
  pub fn hasher(mut self, hasher: H) -> Self {
    self.hasher = hasher;
    self
  }

  /// Builds a [`Cache`] and starts its background janitor.
  pub fn build(self) -> Result<Cache<K, V, H>, BuildError> {
    self.validate()?;

    let store = Arc::new(ShardedStore::new(self.shards, self.hasher.clone()));
    let stats = Arc::new(CacheStats::new());

    let janitor = Janitor::spawn(
      JanitorContext {
        store: Arc::clone(&store),
        stats: Arc::clone(&stats),
      },
      self.sweep_interval,
    )?;

    let shared = Arc::new(CacheShared {
      store,
      stats,
      policy: self.policy,
      capacity: self.capacity,
      time_to_live: self.time_to_live,
      sweep_interval: self.sweep_interval,
      eviction_lock: Mutex::new(()),
      janitor: Some(janitor),
    });

    Ok(Cache { shared })
  }

  /// Validates the builder configuration.
  pub(crate) fn validate(&self) -> Result<(), BuildError> {
    if self.capacity == 0 {
      return Err(BuildError::ZeroCapacity);
    }
    if self.sweep_interval.is_zero() {
      return Err(BuildError::ZeroSweepInterval);
    }
    Ok(())
  }
}

/// A builder for creating [`MultiLevelCache`] instances.
///
/// Both tiers share one policy, default TTL, sweep interval, shard count and
/// hasher. Only their capacities differ.
pub struct MultiLevelCacheBuilder<K, V, H = ahash::RandomState> {
  l1_capacity: usize,
  l2_capacity: usize,
  tier: CacheBuilder<K, V, H>,
}

impl<K, V, H> fmt::Debug for MultiLevelCacheBuilder<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MultiLevelCacheBuilder")
      .field("l1_capacity", &self.l1_capacity)
      .field("l2_capacity", &self.l2_capacity)
      .field("tier", &self.tier)
      .finish()
  }
}

impl<K, V, H> MultiLevelCacheBuilder<K, V, H> {
  /// Sets the capacity of the fast tier.
  pub fn l1_capacity(mut self, capacity: usize) -> Self {
    self.l1_capacity = capacity;
    self
  }

  /// Sets the capacity of the slow tier.
  pub fn l2_capacity(mut self, capacity: usize) -> Self {
    self.l2_capacity = capacity;
    self
  }

  /// Sets the eviction policy used by both tiers.
  pub fn policy(mut self, policy: EvictionPolicy) -> Self {
    self.tier = self.tier.policy(policy);
    self
  }

  /// Sets the default time-to-live used by both tiers.
  pub fn time_to_live(mut self, duration: Duration) -> Self {
    self.tier = self.tier.time_to_live(duration);
    self
  }

  /// Sets the janitor interval used by both tiers.
  pub fn sweep_interval(mut self, interval: Duration) -> Self {
    self.tier = self.tier.sweep_interval(interval);
    self
  }

  /// Sets the shard count used by both tiers.
  pub fn shards(mut self, shards: usize) -> Self {
    self.tier = self.tier.shards(shards);
    self
  }
}

impl<K, V, H: BuildHasher + Default> MultiLevelCacheBuilder<K, V, H> {
  pub fn new() -> Self {
    Self {
      l1_capacity: DEFAULT_L1_CAPACITY,
      l2_capacity: DEFAULT_L2_CAPACITY,
      tier: CacheBuilder::new(),
    }
  }

  /// Creates a builder pre-populated from a deserialized [`MultiLevelConfig`].
  ///
  /// [`MultiLevelConfig`]: crate::config::MultiLevelConfig
  #[cfg(feature = "serde")]
  pub fn from_config(config: &crate::config::MultiLevelConfig) -> Self {
    let mut builder = Self::new()
      .l1_capacity(config.l1_capacity)
      .l2_capacity(config.l2_capacity)
      .policy(config.policy)
      .sweep_interval(config.sweep_interval);
    if let Some(ttl) = config.time_to_live {
      builder = builder.time_to_live(ttl);
    }
    if let Some(shards) = config.shards {
      builder = builder.shards(shards);
    }
    builder
  }
}

impl<K, V> Default for MultiLevelCacheBuilder<K, V, ahash::RandomState> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V, H> MultiLevelCacheBuilder<K, V, H>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Send + Sync + 'static,
  H: BuildHasher + Clone + Send + Sync + 'static,
{
  /// Sets the hasher used by both tiers.
  pub fn hasher(mut self, hasher: H) -> Self {
    self.tier = self.tier.hasher(hasher);
    self
  }

  /// Builds both tiers. Fails if either tier's configuration is invalid.
  pub fn build(self) -> Result<MultiLevelCache<K, V, H>, BuildError> {
    let tier = self.tier;
    let l1_builder = CacheBuilder {
      capacity: self.l1_capacity,
      policy: tier.policy,
      shards: tier.shards,
      time_to_live: tier.time_to_live,
      sweep_interval: tier.sweep_interval,
      hasher: tier.hasher.clone(),
      _key_marker: PhantomData,
      _value_marker: PhantomData,
    };
    // Validate L2 up front so a bad L2 does not leave an orphaned L1 janitor.
    let l2_builder = tier.capacity(self.l2_capacity);
    l2_builder.validate()?;

    let l1 = l1_builder.build()?;
    let l2 = l2_builder.build()?;
    Ok(MultiLevelCache { l1, l2 })
  }
}
