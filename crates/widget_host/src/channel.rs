//! Host message channel contracts and in-memory adapters.

use std::{cell::RefCell, rc::Rc};

use serde_json::Value;

use crate::{error::EmbedError, params::DispatchOutcome};

/// Listener registered on a [`MessageChannel`]; receives each inbound payload.
pub type MessageListener = Box<dyn FnMut(&Value) -> DispatchOutcome>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Identifier of a listener registered on a [`MessageChannel`].
pub struct SubscriptionId(pub u64);

/// Host service delivering cross-document messages to registered listeners.
pub trait MessageChannel {
    /// Registers `listener` until it is unsubscribed.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot register the listener.
    fn subscribe(&self, listener: MessageListener) -> Result<SubscriptionId, EmbedError>;

    /// Removes a listener. Returns `false` when `id` was not registered.
    ///
    /// # Errors
    ///
    /// Returns an error when the host rejects the removal.
    fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, EmbedError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Channel that never delivers messages.
pub struct NoopMessageChannel;

impl MessageChannel for NoopMessageChannel {
    fn subscribe(&self, _listener: MessageListener) -> Result<SubscriptionId, EmbedError> {
        Ok(SubscriptionId(0))
    }

    fn unsubscribe(&self, _id: SubscriptionId) -> Result<bool, EmbedError> {
        Ok(false)
    }
}

type SharedListener = Rc<RefCell<MessageListener>>;

#[derive(Default)]
struct MemoryChannelState {
    next_id: u64,
    listeners: Vec<(SubscriptionId, SharedListener)>,
}

#[derive(Clone, Default)]
/// In-memory channel delivering posted payloads synchronously, in registration order.
pub struct MemoryMessageChannel {
    inner: Rc<RefCell<MemoryChannelState>>,
}

impl std::fmt::Debug for MemoryMessageChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryMessageChannel")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl MemoryMessageChannel {
    /// Delivers `payload` to every registered listener and returns their outcomes.
    ///
    /// Listeners removed by an earlier listener during the same delivery are skipped. A listener
    /// must not post to the channel it is registered on.
    pub fn post(&self, payload: Value) -> Vec<DispatchOutcome> {
        let snapshot: Vec<(SubscriptionId, SharedListener)> = self.inner.borrow().listeners.clone();
        let mut outcomes = Vec::with_capacity(snapshot.len());
        for (id, listener) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            let outcome = (listener.borrow_mut())(&payload);
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Returns whether `id` is currently registered.
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.inner
            .borrow()
            .listeners
            .iter()
            .any(|(registered, _)| *registered == id)
    }
}

impl MessageChannel for MemoryMessageChannel {
    fn subscribe(&self, listener: MessageListener) -> Result<SubscriptionId, EmbedError> {
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);
        state.listeners.push((id, Rc::new(RefCell::new(listener))));
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, EmbedError> {
        let mut state = self.inner.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(registered, _)| *registered != id);
        Ok(state.listeners.len() != before)
    }
}
