//! Widget-to-host message model and type classification.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `type` tag posted by the widget when an offer has been accepted.
pub const ACCEPTED_MESSAGE_TYPE: &str = "accepted";
/// `type` tag posted by the widget for a conversational message.
pub const CHAT_MESSAGE_TYPE: &str = "message";

/// Decodes a field, falling back to its default when it is null or has another JSON type.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
/// Offer state attached to every widget message.
pub struct OfferData {
    /// Offered price.
    #[serde(default, deserialize_with = "lenient")]
    pub price: f64,
    /// Whether the offer has been accepted.
    #[serde(default, deserialize_with = "lenient")]
    pub accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Message forwarded to host callbacks.
///
/// Mirrors the widget wire payload minus the `token` field, which is never re-exposed.
pub struct WidgetMessage {
    /// Raw `type` discriminant as posted by the widget.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable message text.
    #[serde(default, deserialize_with = "lenient")]
    pub message: String,
    /// Offer state.
    #[serde(default, deserialize_with = "lenient")]
    pub data: OfferData,
}

impl WidgetMessage {
    /// Builds a message with the given type tag, text, and offer state.
    pub fn new(kind: impl Into<String>, message: impl Into<String>, data: OfferData) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Full wire payload posted by the widget to the host window.
///
/// Every field decodes leniently: missing, null, or off-type values fall back to their defaults
/// so that routing depends on `type` alone.
pub struct InboundPayload {
    /// Widget session token echoed back by the widget. Never forwarded.
    #[serde(default)]
    pub token: Option<Value>,
    /// Type discriminant; `None` when absent or not a string.
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    /// Human-readable message text.
    #[serde(default, deserialize_with = "lenient")]
    pub message: String,
    /// Offer state.
    #[serde(default, deserialize_with = "lenient")]
    pub data: OfferData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Message types the embedder routes to a callback.
pub enum MessageKind {
    /// Routed to `on_accept`.
    Accepted,
    /// Routed to `on_message`.
    Message,
}

impl MessageKind {
    /// Parses a wire `type` tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            ACCEPTED_MESSAGE_TYPE => Some(Self::Accepted),
            CHAT_MESSAGE_TYPE => Some(Self::Message),
            _ => None,
        }
    }

    /// Returns the wire `type` tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => ACCEPTED_MESSAGE_TYPE,
            Self::Message => CHAT_MESSAGE_TYPE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Classified inbound message ready for dispatch.
pub enum WidgetEvent {
    /// The widget reported an accepted offer.
    Accepted(WidgetMessage),
    /// The widget sent a conversational message.
    Message(WidgetMessage),
}

impl WidgetEvent {
    /// Returns the routing kind of this event.
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Accepted(_) => MessageKind::Accepted,
            Self::Message(_) => MessageKind::Message,
        }
    }

    /// Returns the forwarded message.
    pub fn message(&self) -> &WidgetMessage {
        match self {
            Self::Accepted(message) | Self::Message(message) => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Why an inbound payload was dropped without invoking a callback.
pub enum IgnoreReason {
    /// The payload is not a JSON object.
    NotAnObject,
    /// The payload has no string `type` field.
    MissingType,
    /// The `type` tag is not routed by the embedder.
    UnknownType(String),
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("payload is not an object"),
            Self::MissingType => f.write_str("payload has no string `type`"),
            Self::UnknownType(tag) => write!(f, "unrouted message type `{tag}`"),
        }
    }
}

/// Classifies a raw inbound payload into a routable [`WidgetEvent`].
///
/// # Errors
///
/// Returns the [`IgnoreReason`] for payloads that must be dropped.
pub fn classify_payload(payload: &Value) -> Result<WidgetEvent, IgnoreReason> {
    if !payload.is_object() {
        return Err(IgnoreReason::NotAnObject);
    }
    let decoded = InboundPayload::deserialize(payload).map_err(|_| IgnoreReason::NotAnObject)?;
    let tag = decoded.kind.ok_or(IgnoreReason::MissingType)?;
    let Some(kind) = MessageKind::from_tag(&tag) else {
        return Err(IgnoreReason::UnknownType(tag));
    };
    let message = WidgetMessage {
        kind: tag,
        message: decoded.message,
        data: decoded.data,
    };
    Ok(match kind {
        MessageKind::Accepted => WidgetEvent::Accepted(message),
        MessageKind::Message => WidgetEvent::Message(message),
    })
}
