//! Plain configuration structs that can be loaded from any serde format.
//!
//! Durations use serde's standard `{ "secs": .., "nanos": .. }` form.

use crate::builder::{
  DEFAULT_CAPACITY, DEFAULT_L1_CAPACITY, DEFAULT_L2_CAPACITY, DEFAULT_SWEEP_INTERVAL,
};
use crate::policy::EvictionPolicy;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a single [`Cache`](crate::Cache).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
  pub capacity: usize,
  pub policy: EvictionPolicy,
  /// Default TTL for entries inserted without one.
  pub time_to_live: Option<Duration>,
  pub sweep_interval: Duration,
  /// `None` picks a value from the number of CPUs.
  pub shards: Option<usize>,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      capacity: DEFAULT_CAPACITY,
      policy: EvictionPolicy::default(),
      time_to_live: None,
      sweep_interval: DEFAULT_SWEEP_INTERVAL,
      shards: None,
    }
  }
}

/// Configuration for a [`MultiLevelCache`](crate::MultiLevelCache).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultiLevelConfig {
  pub l1_capacity: usize,
  pub l2_capacity: usize,
  /// Shared by both tiers.
  pub policy: EvictionPolicy,
  pub time_to_live: Option<Duration>,
  pub sweep_interval: Duration,
  pub shards: Option<usize>,
}

impl Default for MultiLevelConfig {
  fn default() -> Self {
    Self {
      l1_capacity: DEFAULT_L1_CAPACITY,
      l2_capacity: DEFAULT_L2_CAPACITY,
      policy: EvictionPolicy::default(),
      time_to_live: None,
      sweep_interval: DEFAULT_SWEEP_INTERVAL,
      shards: None,
    }
  }
}
