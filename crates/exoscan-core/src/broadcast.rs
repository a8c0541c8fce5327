//! Owned listener registry for fan-out delivery.
//!
//! Streaming callers subscribe for prediction events; delivery to one
//! listener must not block or drop delivery to the others. A listener
//! whose receiving end has gone away is pruned on the next broadcast.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};

use tracing::debug;

/// Opaque handle identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry of active listeners with explicit add/remove/broadcast
/// operations; no ambient global state.
#[derive(Debug)]
pub struct ListenerRegistry<T: Clone + Send> {
    listeners: Mutex<Vec<(ListenerId, Sender<T>)>>,
    next_id: AtomicU64,
}

impl<T: Clone + Send> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<T: Clone + Send> ListenerRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and return its handle and receiving end.
    pub fn subscribe(&self) -> (ListenerId, Receiver<T>) {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = channel();
        self.listeners
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((id, sender));
        (id, receiver)
    }

    /// Remove a listener; returns false when it was already gone.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() < before
    }

    /// Deliver an event to every listener. A failed send means the
    /// listener disconnected: it is pruned and delivery continues.
    /// Returns the number of successful deliveries.
    pub fn broadcast(&self, event: &T) -> usize {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        listeners.retain(|(id, sender)| match sender.send(event.clone()) {
            Ok(()) => true,
            Err(_) => {
                debug!(listener = id.0, "listener disconnected, pruned");
                false
            }
        });
        listeners.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
