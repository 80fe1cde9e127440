//! Browser (`wasm32`) implementations of the [`widget_host`] embedding contracts.
//!
//! - [`WebWidgetDocument`] inserts the widget iframe into `document.body`.
//! - [`WebMessageChannel`] routes `window` `message` events to registered listeners.
//! - [`init_widget`] wires both into [`widget_host::init_widget_with`].
//! - `initWidget` (wasm32 only) exposes the embedder to JavaScript host pages.
//!
//! Non-wasm targets compile a fallback shim that reports the browser APIs as unsupported.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

#[cfg(target_arch = "wasm32")]
mod bindings;
pub mod channel;
pub mod document;
pub mod embed;

#[cfg(target_arch = "wasm32")]
pub use bindings::{init_widget_js, JsWidgetHandle};
pub use channel::WebMessageChannel;
pub use document::WebWidgetDocument;
pub use embed::{init_widget, WebWidgetHandle};
