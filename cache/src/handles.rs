//! The user-facing cache handles.

mod multi_level;
mod sync;

pub use multi_level::{MultiLevelCache, TieredStats};
pub use sync::Cache;

use std::sync::Arc;
use std::time::Duration;

/// The in-process contract shared by every cache handle in this crate.
///
/// Lookups and removals report their outcome as values. There is no
/// distinction between an entry that was evicted, one that expired and one
/// that was never inserted.
pub trait KeyValueCache<K, V> {
  /// Looks up `key`, returning the value if it is present and not expired.
  fn get(&self, key: &K) -> Option<Arc<V>>;

  /// Inserts or replaces `key` using the cache's default TTL.
  fn insert(&self, key: K, value: V);

  /// Inserts or replaces `key` with an explicit TTL measured from now.
  fn insert_with_ttl(&self, key: K, value: V, ttl: Duration);

  /// Removes `key`. Returns whether anything was removed.
  fn invalidate(&self, key: &K) -> bool;

  /// The number of entries currently held.
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Removes every entry. Statistics are kept.
  fn clear(&self);
}
