//! In-process change-event bus owned by the store.

use std::panic::{catch_unwind, AssertUnwindSafe};

use screenplay_model::ChangeEvent;

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ChangeEvent) + Send>;

/// Synchronous fan-out of change events to registered subscribers
///
/// Delivery runs on the caller's thread, in subscription order, after
/// the durable write and before the mutating call returns.
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a callback; returns the handle for unsubscribing
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&ChangeEvent) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a callback; reports whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver one event to every subscriber in subscription order.
    /// A panicking subscriber is logged and skipped; the write that
    /// produced the event is already durable and is not rolled back.
    pub fn emit(&mut self, event: &ChangeEvent) {
        for (id, subscriber) in &mut self.subscribers {
            if catch_unwind(AssertUnwindSafe(|| subscriber(event))).is_err() {
                tracing::error!(subscription = id.0, "change-event subscriber panicked");
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
