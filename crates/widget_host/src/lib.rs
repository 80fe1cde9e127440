//! Target-independent contracts for embedding the negotiation widget in a host page.
//!
//! The embedder inserts one iframe pointing at the widget URL and routes messages the widget
//! posts back to the host window into typed callbacks. Browser adapters for the
//! [`WidgetDocument`] and [`MessageChannel`] seams live in `widget_host_web`; the in-memory
//! adapters here back tests and non-browser hosts.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod channel;
pub mod document;
pub mod embed;
pub mod error;
pub mod frame;
pub mod message;
pub mod params;

pub use channel::{
    MemoryMessageChannel, MessageChannel, MessageListener, NoopMessageChannel, SubscriptionId,
};
pub use document::{FrameId, MemoryWidgetDocument, NoopWidgetDocument, WidgetDocument};
pub use embed::{init_widget_with, WidgetHandle};
pub use error::EmbedError;
pub use frame::{widget_src, IframeSpec, WIDGET_FRAME_STYLE};
pub use message::{
    classify_payload, IgnoreReason, InboundPayload, MessageKind, OfferData, WidgetEvent,
    WidgetMessage, ACCEPTED_MESSAGE_TYPE, CHAT_MESSAGE_TYPE,
};
pub use params::{
    DispatchOutcome, InitParams, WidgetCallback, WidgetCallbacks, WidgetOptions,
    DEFAULT_WIDGET_SOURCE,
};
