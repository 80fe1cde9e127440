//! Browser entry point for embedding the widget.

use leptos::logging;
use widget_host::{init_widget_with, EmbedError, InitParams, WidgetHandle};

use crate::{WebMessageChannel, WebWidgetDocument};

/// Handle for a widget embedded through [`init_widget`].
pub type WebWidgetHandle = WidgetHandle<WebMessageChannel>;

/// Inserts the widget iframe into `document.body` and routes `window` messages to `params`.
///
/// # Errors
///
/// Returns an error when the browser document, body, or window is unavailable, or when the DOM
/// rejects the iframe or the listener. On non-wasm targets this always fails with
/// [`EmbedError::Unsupported`].
pub fn init_widget(params: InitParams) -> Result<WebWidgetHandle, EmbedError> {
    init_widget_with(&WebWidgetDocument, WebMessageChannel::default(), params).map_err(|err| {
        logging::warn!("widget embed failed: {err}");
        err
    })
}
