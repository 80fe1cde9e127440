use super::*;

/// Uninhabited: no listener can be registered off wasm32.
pub enum Listener {}

impl RetainedListener for Listener {
    fn leak(self) {
        match self {}
    }
}

pub fn subscribe(
    _registry: &RefCell<Registry<Listener>>,
    _listener: MessageListener,
) -> Result<SubscriptionId, EmbedError> {
    Err(EmbedError::Unsupported("window message listeners"))
}

pub fn unsubscribe(
    _registry: &RefCell<Registry<Listener>>,
    _id: SubscriptionId,
) -> Result<bool, EmbedError> {
    Ok(false)
}
