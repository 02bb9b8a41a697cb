use crate::error::BuildError;
use crate::metrics::CacheStats;
use crate::store::ShardedStore;
use crate::time;

use std::hash::{BuildHasher, Hash};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// The name given to every janitor thread.
const JANITOR_THREAD_NAME: &str = "tiercache-janitor";

/// A context object holding the thread-safe parts of the cache that the
/// janitor needs to access.
pub(crate) struct JanitorContext<K, V, H> {
  pub(crate) store: Arc<ShardedStore<K, V, H>>,
  pub(crate) stats: Arc<CacheStats>,
}

#[derive(Default)]
struct StopSignal {
  stopped: Mutex<bool>,
  wakeup: Condvar,
}

/// The background task that periodically removes expired entries.
///
/// It does not hold the cache itself, only the store and stats, so dropping
/// the last cache handle is what stops it.
pub(crate) struct Janitor {
  // Never joined: stopping does not wait for an in-flight sweep.
  _handle: JoinHandle<()>,
  signal: Arc<StopSignal>,
}

impl Janitor {
  /// Spawns a new janitor thread that sweeps every `tick_interval`.
  pub(crate) fn spawn<K, V, H>(
    context: JanitorContext<K, V, H>,
    tick_interval: Duration,
  ) -> Result<Self, BuildError>
  where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
    H: BuildHasher + Clone + Send + Sync + 'static,
  {
    Self::start(tick_interval, move || {
      sweep_expired(&context.store, &context.stats);
    })
  }

  /// Runs `task` on a dedicated thread once per tick until stopped.
  fn start<F>(tick_interval: Duration, mut task: F) -> Result<Self, BuildError>
  where
    F: FnMut() + Send + 'static,
  {
    let signal = Arc::new(StopSignal::default());
    let thread_signal = Arc::clone(&signal);

    let handle = thread::Builder::new()
      .name(JANITOR_THREAD_NAME.to_string())
      .spawn(move || {
        tracing::debug!(interval = ?tick_interval, "janitor started");
        while Self::wait_for_tick(&thread_signal, tick_interval) {
          Self::run_isolated(&mut task);
        }
        tracing::debug!("janitor stopped");
      })
      .map_err(|e| BuildError::JanitorSpawn(e.to_string()))?;

    Ok(Self {
      _handle: handle,
      signal,
    })
  }

  /// Sleeps until the next tick. Returns `false` once a stop was requested.
  ///
  /// An interval too large to be added to `Instant::now()` means the janitor
  /// never ticks and only wakes up to stop.
  fn wait_for_tick(signal: &StopSignal, tick_interval: Duration) -> bool {
    let deadline = Instant::now().checked_add(tick_interval);
    let mut stopped = signal.stopped.lock();
    while !*stopped {
      match deadline {
        Some(deadline) => {
          if signal.wakeup.wait_until(&mut stopped, deadline).timed_out() {
            break;
          }
        }
        None => signal.wakeup.wait(&mut stopped),
      }
    }
    !*stopped
  }

  /// One sweep pass. A panic here is logged and swallowed so the loop survives.
  fn run_isolated<F: FnMut()>(task: &mut F) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
      let reason = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
      tracing::error!(%reason, "expiry sweep panicked; janitor keeps running");
    }
  }

  /// Signals the janitor thread to stop. Does not wait for it.
  pub(crate) fn stop(&self) {
    let mut stopped = self.signal.stopped.lock();
    *stopped = true;
    self.signal.wakeup.notify_all();
  }
}

/// Removes every expired entry regardless of eviction policy, counting each
/// one as an eviction.
pub(crate) fn sweep_expired<K, V, H>(store: &ShardedStore<K, V, H>, stats: &CacheStats) -> usize
where
  K: Eq + Hash,
  H: BuildHasher + Clone,
{
  let removed = store.remove_expired(time::now_nanos());
  stats.record_evictions(removed as u64);
  if removed > 0 {
    tracing::debug!(removed, remaining = store.len(), "expiry sweep removed entries");
  }
  removed
}
