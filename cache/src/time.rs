use once_cell::sync::Lazy;
use std::time::{Duration, Instant};

// The single, static reference point for all time calculations in the cache.
// It is initialized lazily on its first use.
static CACHE_EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

/// Converts an `Instant` into a `Duration` since the cache's epoch.
#[inline]
pub(crate) fn instant_to_duration(instant: Instant) -> Duration {
  instant.saturating_duration_since(*CACHE_EPOCH)
}

/// The current time as a `Duration` since the epoch.
#[inline]
pub(crate) fn now_duration() -> Duration {
  instant_to_duration(Instant::now())
}

/// The current time in nanoseconds since the epoch. Fits an `AtomicU64`.
#[inline]
pub(crate) fn now_nanos() -> u64 {
  now_duration().as_nanos() as u64
}
