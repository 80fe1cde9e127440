use leptos::logging;
use serde_json::Value;
use wasm_bindgen::{closure::Closure, JsCast};
use widget_host::DispatchOutcome;

use super::*;

pub type Listener = Closure<dyn FnMut(web_sys::MessageEvent)>;

impl RetainedListener for Listener {
    fn leak(self) {
        self.forget();
    }
}

fn window() -> Result<web_sys::Window, EmbedError> {
    web_sys::window().ok_or(EmbedError::WindowUnavailable)
}

pub fn subscribe(
    registry: &RefCell<Registry<Listener>>,
    mut listener: MessageListener,
) -> Result<SubscriptionId, EmbedError> {
    let window = window()?;
    let on_message = Listener::wrap(Box::new(move |event: web_sys::MessageEvent| {
        let payload = match serde_wasm_bindgen::from_value::<Value>(event.data()) {
            Ok(payload) => payload,
            Err(err) => {
                logging::debug_warn!(
                    "dropping undecodable message from `{}`: {err}",
                    event.origin()
                );
                return;
            }
        };
        if let DispatchOutcome::Ignored(reason) = listener(&payload) {
            logging::debug_warn!("dropping message from `{}`: {reason}", event.origin());
        }
    }));
    window
        .add_event_listener_with_callback(MESSAGE_EVENT, on_message.as_ref().unchecked_ref())
        .map_err(|err| EmbedError::Dom(format!("failed to add message listener: {err:?}")))?;

    Ok(registry.borrow_mut().insert(on_message))
}

pub fn unsubscribe(
    registry: &RefCell<Registry<Listener>>,
    id: SubscriptionId,
) -> Result<bool, EmbedError> {
    let window = window()?;
    let Some(on_message) = registry.borrow_mut().remove(id) else {
        return Ok(false);
    };
    if let Err(err) = window
        .remove_event_listener_with_callback(MESSAGE_EVENT, on_message.as_ref().unchecked_ref())
    {
        on_message.leak();
        return Err(EmbedError::Dom(format!("failed to remove message listener: {err:?}")));
    }
    Ok(true)
}
