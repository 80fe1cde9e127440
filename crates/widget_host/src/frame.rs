//! Iframe description derived from [`InitParams`].

use crate::params::InitParams;

/// Inline style applied to every widget iframe.
pub const WIDGET_FRAME_STYLE: &str =
    "position:fixed;bottom:20px;right:20px;width:350px;height:500px;border:none;";

/// Builds the iframe URL. The token is appended verbatim, without escaping.
pub fn widget_src(widget_source: &str, token: &str) -> String {
    format!("{widget_source}?token={token}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Attributes of the iframe the embedder inserts.
pub struct IframeSpec {
    /// Frame `src`.
    pub src: String,
    /// Inline `style` text.
    pub style: &'static str,
}

impl IframeSpec {
    /// Describes the iframe for `params`.
    pub fn for_params(params: &InitParams) -> Self {
        Self {
            src: widget_src(&params.widget_source, &params.token),
            style: WIDGET_FRAME_STYLE,
        }
    }
}
