use thiserror::Error;

/// Errors that can occur when building a cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
  /// The cache was configured with a capacity of zero. Every cache is bounded.
  #[error("cache capacity must be greater than zero")]
  ZeroCapacity,
  /// The background sweep was configured with a zero-length period.
  #[error("sweep interval cannot be zero")]
  ZeroSweepInterval,
  /// The OS refused to start the background sweep thread.
  #[error("failed to spawn the janitor thread: {0}")]
  JanitorSpawn(String),
}
