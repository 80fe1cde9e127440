//! Subscription bookkeeping shared by the target-specific channel implementations.

use std::collections::HashMap;

use widget_host::SubscriptionId;

/// Value that must outlive its registry entry while the host still references it.
pub trait RetainedListener {
    /// Releases ownership without invalidating what the host holds.
    fn leak(self);
}

/// Listeners keyed by subscription.
///
/// Entries still present when the registry is dropped are leaked, so a listener that was never
/// unsubscribed keeps running for the lifetime of the page.
pub struct Registry<L: RetainedListener> {
    next_id: u64,
    listeners: HashMap<SubscriptionId, L>,
}

impl<L: RetainedListener> Default for Registry<L> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: HashMap::new(),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl<L: RetainedListener> Registry<L> {
    /// Stores `listener` under a fresh id.
    pub fn insert(&mut self, listener: L) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.insert(id, listener);
        id
    }

    /// Takes back ownership of a listener.
    pub fn remove(&mut self, id: SubscriptionId) -> Option<L> {
        self.listeners.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl<L: RetainedListener> Drop for Registry<L> {
    fn drop(&mut self) {
        for (_, listener) in self.listeners.drain() {
            listener.leak();
        }
    }
}
