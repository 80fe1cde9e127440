//! Widget initialization parameters and callback routing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::message::{classify_payload, IgnoreReason, WidgetEvent, WidgetMessage};

/// Widget URL used when the host does not supply one.
pub const DEFAULT_WIDGET_SOURCE: &str = "https://www.parleyai.net/widget";

/// Host callback invoked with a forwarded widget message.
pub type WidgetCallback = Box<dyn FnMut(&WidgetMessage)>;

fn noop_callback() -> WidgetCallback {
    Box::new(|_| {})
}

/// Renders any JSON token as URL text; strings are kept verbatim.
fn token_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(token) => token,
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Serializable part of the widget configuration, as supplied by JS host pages.
pub struct WidgetOptions {
    /// Widget session token appended to the iframe URL. Non-string tokens are rendered as JSON
    /// text.
    #[serde(deserialize_with = "token_text")]
    pub token: String,
    /// Widget URL override.
    #[serde(default)]
    pub widget_source: Option<String>,
}

/// Configuration for a single [`crate::init_widget_with`] call.
pub struct InitParams {
    /// Widget session token. Not validated.
    pub token: String,
    /// Widget URL the token query parameter is appended to.
    pub widget_source: String,
    /// Routed callbacks.
    pub callbacks: WidgetCallbacks,
}

impl InitParams {
    /// Creates parameters for `token` with the default source and no-op callbacks.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            widget_source: DEFAULT_WIDGET_SOURCE.to_string(),
            callbacks: WidgetCallbacks::default(),
        }
    }

    /// Creates parameters from deserialized options, keeping no-op callbacks.
    pub fn from_options(options: WidgetOptions) -> Self {
        let mut params = Self::new(options.token);
        if let Some(source) = options.widget_source {
            params.widget_source = source;
        }
        params
    }

    /// Overrides the widget URL.
    pub fn with_widget_source(mut self, source: impl Into<String>) -> Self {
        self.widget_source = source.into();
        self
    }

    /// Sets the callback for `accepted` messages.
    pub fn on_accept(mut self, callback: impl FnMut(&WidgetMessage) + 'static) -> Self {
        self.callbacks.on_accept = Box::new(callback);
        self
    }

    /// Sets the callback for `message` messages.
    pub fn on_message(mut self, callback: impl FnMut(&WidgetMessage) + 'static) -> Self {
        self.callbacks.on_message = Box::new(callback);
        self
    }
}

impl std::fmt::Debug for InitParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitParams")
            .field("token", &self.token)
            .field("widget_source", &self.widget_source)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of delivering one inbound payload to [`WidgetCallbacks::dispatch`].
pub enum DispatchOutcome {
    /// `on_accept` ran.
    Accepted,
    /// `on_message` ran.
    Message,
    /// No callback ran.
    Ignored(IgnoreReason),
}

/// Callback pair receiving classified widget messages.
pub struct WidgetCallbacks {
    on_accept: WidgetCallback,
    on_message: WidgetCallback,
}

impl Default for WidgetCallbacks {
    fn default() -> Self {
        Self {
            on_accept: noop_callback(),
            on_message: noop_callback(),
        }
    }
}

impl WidgetCallbacks {
    /// Routes a classified event to exactly one callback.
    pub fn deliver(&mut self, event: &WidgetEvent) {
        match event {
            WidgetEvent::Accepted(message) => (self.on_accept)(message),
            WidgetEvent::Message(message) => (self.on_message)(message),
        }
    }

    /// Classifies a raw payload and routes it.
    ///
    /// Callback panics are not caught.
    pub fn dispatch(&mut self, payload: &Value) -> DispatchOutcome {
        match classify_payload(payload) {
            Ok(event) => {
                self.deliver(&event);
                match event {
                    WidgetEvent::Accepted(_) => DispatchOutcome::Accepted,
                    WidgetEvent::Message(_) => DispatchOutcome::Message,
                }
            }
            Err(reason) => DispatchOutcome::Ignored(reason),
        }
    }
}
