//! JavaScript-facing `initWidget` export.

use leptos::logging;
use serde::Serialize;
use wasm_bindgen::{closure::Closure, prelude::*, JsCast};
use widget_host::{InitParams, WidgetMessage, WidgetOptions};

use crate::{init_widget, WebWidgetHandle};

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

#[wasm_bindgen(js_name = WidgetHandle)]
/// JavaScript handle for an embedded widget.
pub struct JsWidgetHandle {
    inner: Option<WebWidgetHandle>,
}

#[wasm_bindgen(js_class = WidgetHandle)]
impl JsWidgetHandle {
    /// Stops routing widget messages. Calling it again is a no-op.
    pub fn dispose(&mut self) -> Result<(), JsValue> {
        let Some(handle) = self.inner.take() else {
            return Ok(());
        };
        handle.dispose().map_err(|err| js_error(&err.to_string()))
    }
}

/// Embeds the widget from a JS options object
/// `{ token, widgetSource?, onAccept?, onMessage? }`.
///
/// # Errors
///
/// Throws when the options are malformed or the page cannot host the iframe.
#[wasm_bindgen(js_name = initWidget)]
pub fn init_widget_js(options: JsValue) -> Result<JsWidgetHandle, JsValue> {
    let parsed: WidgetOptions = serde_wasm_bindgen::from_value(options.clone())
        .map_err(|err| js_error(&format!("invalid widget options: {err}")))?;
    let mut params = InitParams::from_options(parsed);
    if let Some(callback) = callback_field(&options, "onAccept")? {
        params = params.on_accept(forward_to(callback));
    }
    if let Some(callback) = callback_field(&options, "onMessage")? {
        params = params.on_message(forward_to(callback));
    }
    let handle = init_widget(params).map_err(|err| js_error(&err.to_string()))?;
    Ok(JsWidgetHandle {
        inner: Some(handle),
    })
}

fn callback_field(options: &JsValue, name: &str) -> Result<Option<js_sys::Function>, JsValue> {
    let value = js_sys::Reflect::get(options, &JsValue::from_str(name))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    value
        .dyn_into::<js_sys::Function>()
        .map(Some)
        .map_err(|_| js_error(&format!("`{name}` must be a function")))
}

fn forward_to(callback: js_sys::Function) -> impl FnMut(&WidgetMessage) {
    move |message: &WidgetMessage| {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let payload = match message.serialize(&serializer) {
            Ok(payload) => payload,
            Err(err) => {
                logging::warn!("widget message conversion failed: {err}");
                return;
            }
        };
        if let Err(thrown) = callback.call1(&JsValue::NULL, &payload) {
            rethrow_later(thrown);
        }
    }
}

// Throwing inside the message closure would leave it unusable; rethrow on the next task.
fn rethrow_later(thrown: JsValue) {
    let Some(window) = web_sys::window() else {
        logging::warn!("widget callback threw with no window to rethrow on: {thrown:?}");
        return;
    };
    let rethrow = Closure::once_into_js(move || {
        wasm_bindgen::throw_val(thrown);
    });
    if let Err(err) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(rethrow.unchecked_ref(), 0)
    {
        logging::warn!("widget callback exception could not be rethrown: {err:?}");
    }
}
