//! A bounded, thread-safe key-value cache with pluggable eviction.
//!
//! # Features
//! - **Bounded**: every cache has a capacity. When an insert pushes it over,
//!   exactly one victim is chosen by [`EvictionPolicy::Lru`],
//!   [`EvictionPolicy::Lfu`] or [`EvictionPolicy::Ttl`].
//! - **Concurrent**: point operations lock a single shard. Eviction takes a
//!   short exclusive lock of its own and never blocks reads of other keys.
//! - **Expiry**: fixed (non-sliding) TTLs, enforced lazily on read and by a
//!   background janitor thread that stops when the cache is dropped.
//! - **Two tiers**: [`MultiLevelCache`] writes through to an L1 and an L2 and
//!   promotes L2 hits into L1.
//! - **Observability**: live hit/miss/eviction counters per cache, plus
//!   `tracing` events for evictions and sweeps.

// Public modules that form the API
pub mod builder;
#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod handles;
pub mod metrics;
pub mod policy;

// Internal, crate-only modules
mod entry;
mod shared;
mod store;
mod task;
mod time;

// Re-export the primary user-facing types for convenience
pub use builder::{CacheBuilder, MultiLevelCacheBuilder};
pub use error::BuildError;
pub use handles::{Cache, KeyValueCache, MultiLevelCache, TieredStats};
pub use metrics::{CacheStats, StatsSnapshot};
pub use policy::EvictionPolicy;
