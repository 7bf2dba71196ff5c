//! Keyed trailing-edge debouncer on tokio timers.
//!
//! Every [`schedule`](Debouncer::schedule) call replaces whatever was
//! pending under the same key and restarts the quiet period. Once the
//! period elapses the latest action runs exactly once, detached from the
//! timer, so a later `schedule` or `cancel` never interrupts a command that
//! is already on its way to the hub.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiet period used by card features unless configured otherwise.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Coalesces bursts of calls per key into one trailing invocation.
///
/// Dropping the debouncer cancels every pending timer.
pub struct Debouncer<K> {
    delay: Duration,
    pending: Mutex<HashMap<K, JoinHandle<()>>>,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
{
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer for `key`, superseding any pending action under it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, key: K, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let timer_key = key.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(key = ?timer_key, "debounce elapsed, dispatching");
            tokio::spawn(action());
        });

        let mut pending = self.lock();
        pending.retain(|_, handle| !handle.is_finished());
        if let Some(previous) = pending.insert(key, timer) {
            previous.abort();
        }
    }

    /// Drop the pending action for `key`. Returns whether one was pending.
    pub fn cancel(&self, key: &K) -> bool {
        match self.lock().remove(key) {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                tracing::debug!(?key, "pending action cancelled");
                true
            }
            _ => false,
        }
    }

    /// Drop every pending action.
    pub fn cancel_all(&self) {
        for (_, handle) in self.lock().drain() {
            handle.abort();
        }
    }

    /// Whether an action is waiting for its quiet period under `key`.
    #[must_use]
    pub fn is_pending(&self, key: &K) -> bool {
        self.lock()
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, handle) in pending.drain() {
            handle.abort();
        }
    }
}
