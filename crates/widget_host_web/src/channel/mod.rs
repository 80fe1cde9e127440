//! `window` message-event channel for browser hosts.
//!
//! Registration is routed to target-specific implementations; the wasm build keeps each
//! listener's closure in a per-channel [`Registry`] until it is unsubscribed. Closures still
//! registered when the last channel clone is dropped are leaked so the page keeps routing.

use std::{cell::RefCell, rc::Rc};

use widget_host::{EmbedError, MessageChannel, MessageListener, SubscriptionId};

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
mod registry;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

use registry::{Registry, RetainedListener};

/// DOM event name carrying cross-document messages.
pub const MESSAGE_EVENT: &str = "message";

#[derive(Clone, Default)]
/// Message channel backed by `window.addEventListener("message", ...)`.
///
/// Clones share one listener registry, so a listener can be removed through any clone.
pub struct WebMessageChannel {
    registry: Rc<RefCell<Registry<imp::Listener>>>,
}

impl std::fmt::Debug for WebMessageChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebMessageChannel")
            .field("listeners", &self.registry.borrow().len())
            .finish()
    }
}

impl MessageChannel for WebMessageChannel {
    fn subscribe(&self, listener: MessageListener) -> Result<SubscriptionId, EmbedError> {
        imp::subscribe(&self.registry, listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, EmbedError> {
        imp::unsubscribe(&self.registry, id)
    }
}
