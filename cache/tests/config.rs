#![cfg(feature = "serde")]

use std::time::Duration;

use tiercache::config::{CacheConfig, MultiLevelConfig};
use tiercache::{CacheBuilder, EvictionPolicy, MultiLevelCacheBuilder};

#[test]
fn test_cache_config_from_json() {
  let json = r#"{
    "capacity": 3,
    "policy": "lfu",
    "time_to_live": { "secs": 2, "nanos": 0 }
  }"#;
  let config: CacheConfig = serde_json::from_str(json).unwrap();

  assert_eq!(config.capacity, 3);
  assert_eq!(config.policy, EvictionPolicy::Lfu);
  assert_eq!(config.time_to_live, Some(Duration::from_secs(2)));
  assert_eq!(config.sweep_interval, Duration::from_secs(60), "missing fields use defaults");

  let cache = CacheBuilder::<String, String>::from_config(&config).build().unwrap();
  assert_eq!(cache.capacity(), 3);
  assert_eq!(cache.policy(), EvictionPolicy::Lfu);
  assert_eq!(cache.time_to_live(), Some(Duration::from_secs(2)));
}

#[test]
fn test_zero_capacity_config_is_rejected_at_build() {
  let config: CacheConfig = serde_json::from_str(r#"{ "capacity": 0 }"#).unwrap();
  assert!(CacheBuilder::<u8, u8>::from_config(&config).build().is_err());
}

#[test]
fn test_unknown_policy_is_rejected() {
  let result = serde_json::from_str::<CacheConfig>(r#"{ "policy": "fifo" }"#);
  assert!(result.is_err());
}

#[test]
fn test_multi_level_config_round_trip() {
  let config = MultiLevelConfig {
    l1_capacity: 8,
    l2_capacity: 64,
    policy: EvictionPolicy::Ttl,
    ..Default::default()
  };
  let json = serde_json::to_string(&config).unwrap();
  assert!(json.contains("\"ttl\""));

  let parsed: MultiLevelConfig = serde_json::from_str(&json).unwrap();
  assert_eq!(parsed, config);

  let cache = MultiLevelCacheBuilder::<u32, u32>::from_config(&parsed).build().unwrap();
  assert_eq!(cache.l1().capacity(), 8);
  assert_eq!(cache.l2().capacity(), 64);
  assert_eq!(cache.l2().policy(), EvictionPolicy::Ttl);
}

#[test]
fn test_unknown_fields_are_rejected() {
  let result = serde_json::from_str::<CacheConfig>(r#"{ "capacity": 4, "max_cost": 10 }"#);
  assert!(result.is_err());
}
