//! Environment failures surfaced by widget embedding.

use thiserror::Error;

/// Error raised when the host environment cannot support the embedder.
///
/// Inbound message problems are never reported through this type; they are dropped by the
/// dispatcher and described by [`crate::IgnoreReason`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    /// The global `window` object is missing.
    #[error("window unavailable")]
    WindowUnavailable,
    /// The window has no `document`.
    #[error("document unavailable")]
    DocumentUnavailable,
    /// The document has no `body` to append the iframe to.
    #[error("document body unavailable")]
    BodyUnavailable,
    /// A DOM call was rejected.
    #[error("dom operation failed: {0}")]
    Dom(String),
    /// The operation needs browser APIs the current target does not provide.
    #[error("{0} is only available when compiled for wasm32")]
    Unsupported(&'static str),
}
