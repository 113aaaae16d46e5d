//! Single-flight execution: concurrent callers asking for the same key share
//! one running operation and all observe its single result.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Weak};

/// Shared handle to an in-flight operation
pub type InFlight<T> = Shared<BoxFuture<'static, T>>;

/// A call to [`SingleFlight::join`]
pub struct Flight<T: Clone> {
    pub future: InFlight<T>,
    /// `true` if this call started the operation
    pub leader: bool,
}

/// Guarded slots of in-flight operations keyed by operation identity.
///
/// A slot is vacated as soon as its operation completes, so the next `join`
/// after completion starts a fresh operation.
pub struct SingleFlight<K, T: Clone> {
    slots: Arc<Mutex<HashMap<K, InFlight<T>>>>,
}

impl<K, T> Default for SingleFlight<K, T>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> SingleFlight<K, T>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_in_flight(&self, key: &K) -> bool {
        self.slots.lock().contains_key(key)
    }

    /// Attach to the operation running under `key`, or start one with `start`.
    ///
    /// `start` is only invoked when no operation for `key` is in flight. The
    /// returned future is lazy: somebody has to poll it (the leader usually
    /// spawns it) for the operation to make progress.
    pub fn join<F, Fut>(&self, key: K, start: F) -> Flight<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let mut slots = self.slots.lock();
        if let Some(existing) = slots.get(&key) {
            return Flight {
                future: existing.clone(),
                leader: false,
            };
        }

        let operation = start();
        let registry: Weak<Mutex<HashMap<K, InFlight<T>>>> = Arc::downgrade(&self.slots);
        let slot_key = key.clone();
        let future = async move {
            let output = operation.await;
            if let Some(registry) = registry.upgrade() {
                registry.lock().remove(&slot_key);
            }
            output
        }
        .boxed()
        .shared();

        slots.insert(key, future.clone());
        Flight {
            future,
            leader: true,
        }
    }
}
