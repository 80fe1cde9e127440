//! Widget embedding entry point shared by every host adapter.

use crate::{
    channel::{MessageChannel, SubscriptionId},
    document::{FrameId, WidgetDocument},
    error::EmbedError,
    frame::IframeSpec,
    params::InitParams,
};

/// Live widget subscription returned by [`init_widget_with`].
///
/// Dropping the handle leaves the listener registered for the lifetime of the page; call
/// [`WidgetHandle::dispose`] to stop routing messages.
#[derive(Debug)]
#[must_use = "dropping the handle keeps the listener registered with no way to remove it"]
pub struct WidgetHandle<C: MessageChannel> {
    channel: C,
    frame: FrameId,
    subscription: SubscriptionId,
}

impl<C: MessageChannel> WidgetHandle<C> {
    /// Returns the inserted iframe.
    pub fn frame(&self) -> FrameId {
        self.frame
    }

    /// Returns the registered message listener.
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Unregisters the message listener. The iframe stays in the document.
    ///
    /// # Errors
    ///
    /// Returns an error when the channel rejects the removal.
    pub fn dispose(self) -> Result<(), EmbedError> {
        self.channel.unsubscribe(self.subscription).map(|_| ())
    }
}

/// Inserts the widget iframe into `document` and routes `channel` messages to the callbacks in
/// `params`.
///
/// # Errors
///
/// Returns an error when the iframe cannot be inserted or the listener cannot be registered. An
/// iframe inserted before a failed registration is left in place.
pub fn init_widget_with<D, C>(
    document: &D,
    channel: C,
    params: InitParams,
) -> Result<WidgetHandle<C>, EmbedError>
where
    D: WidgetDocument + ?Sized,
    C: MessageChannel,
{
    let spec = IframeSpec::for_params(&params);
    let frame = document.append_iframe(&spec)?;
    let mut callbacks = params.callbacks;
    let subscription = channel.subscribe(Box::new(move |payload| callbacks.dispatch(payload)))?;
    Ok(WidgetHandle {
        channel,
        frame,
        subscription,
    })
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{
        channel::{MemoryMessageChannel, MessageListener},
        document::MemoryWidgetDocument,
        frame::WIDGET_FRAME_STYLE,
        message::{IgnoreReason, OfferData, WidgetMessage},
        params::{DispatchOutcome, DEFAULT_WIDGET_SOURCE},
    };

    #[derive(Debug)]
    struct RejectingChannel;

    impl MessageChannel for RejectingChannel {
        fn subscribe(&self, _listener: MessageListener) -> Result<SubscriptionId, EmbedError> {
            Err(EmbedError::WindowUnavailable)
        }

        fn unsubscribe(&self, _id: SubscriptionId) -> Result<bool, EmbedError> {
            Ok(false)
        }
    }

    struct BodylessDocument;

    impl WidgetDocument for BodylessDocument {
        fn append_iframe(&self, _spec: &IframeSpec) -> Result<FrameId, EmbedError> {
            Err(EmbedError::BodyUnavailable)
        }
    }

    fn collector() -> (Rc<RefCell<Vec<WidgetMessage>>>, impl FnMut(&WidgetMessage)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |message: &WidgetMessage| {
            sink.borrow_mut().push(message.clone())
        })
    }

    #[test]
    fn init_appends_exactly_one_iframe_with_token_src() {
        let document = MemoryWidgetDocument::default();
        let channel = MemoryMessageChannel::default();
        let params = InitParams::new("abc").with_widget_source("https://w.test/embed");

        let handle = init_widget_with(&document, channel.clone(), params).expect("init");

        assert_eq!(
            document.frames(),
            vec![IframeSpec {
                src: "https://w.test/embed?token=abc".to_string(),
                style: WIDGET_FRAME_STYLE,
            }]
        );
        assert_eq!(handle.frame(), FrameId(1));
        assert!(channel.is_subscribed(handle.subscription()));
    }

    #[test]
    fn accepted_message_reaches_only_on_accept() {
        let document = MemoryWidgetDocument::default();
        let channel = MemoryMessageChannel::default();
        let (accepted, on_accept) = collector();
        let (messages, on_message) = collector();
        let params = InitParams::new("abc")
            .on_accept(on_accept)
            .on_message(on_message);
        let _handle = init_widget_with(&document, channel.clone(), params).expect("init");

        let outcomes = channel.post(json!({
            "token": "abc",
            "type": "accepted",
            "message": "done",
            "data": { "price": 10, "accepted": true }
        }));

        assert_eq!(outcomes, vec![DispatchOutcome::Accepted]);
        assert_eq!(
            *accepted.borrow(),
            vec![WidgetMessage::new(
                "accepted",
                "done",
                OfferData {
                    price: 10.0,
                    accepted: true,
                },
            )]
        );
        assert!(messages.borrow().is_empty());
    }

    #[test]
    fn chat_message_reaches_only_on_message() {
        let document = MemoryWidgetDocument::default();
        let channel = MemoryMessageChannel::default();
        let (accepted, on_accept) = collector();
        let (messages, on_message) = collector();
        let params = InitParams::new("abc")
            .on_accept(on_accept)
            .on_message(on_message);
        let _handle = init_widget_with(&document, channel.clone(), params).expect("init");

        channel.post(json!({
            "type": "message",
            "message": "counter offer",
            "data": { "price": 12.5, "accepted": false }
        }));

        assert!(accepted.borrow().is_empty());
        assert_eq!(messages.borrow().len(), 1);
        assert_eq!(messages.borrow()[0].message, "counter offer");
    }

    #[test]
    fn routed_types_dispatch_regardless_of_other_field_shapes() {
        let document = MemoryWidgetDocument::default();
        let channel = MemoryMessageChannel::default();
        let (accepted, on_accept) = collector();
        let (messages, on_message) = collector();
        let params = InitParams::new("abc")
            .on_accept(on_accept)
            .on_message(on_message);
        let _handle = init_widget_with(&document, channel.clone(), params).expect("init");

        let accepted_payloads = [
            json!({ "type": "accepted", "message": "done", "data": null }),
            json!({ "type": "accepted", "message": null, "data": { "price": 3 } }),
            json!({ "type": "accepted", "token": 123, "message": "done" }),
            json!({ "type": "accepted", "data": { "price": "10", "accepted": true } }),
        ];
        for payload in accepted_payloads {
            assert_eq!(channel.post(payload), vec![DispatchOutcome::Accepted]);
        }
        assert_eq!(
            channel.post(json!({ "type": "message", "token": ["x"], "message": 5 })),
            vec![DispatchOutcome::Message]
        );

        assert_eq!(accepted.borrow().len(), 4);
        assert_eq!(messages.borrow().len(), 1);
        assert_eq!(accepted.borrow()[1].data.price, 3.0);
        assert!(accepted.borrow()[3].data.accepted);
        for forwarded in accepted.borrow().iter().chain(messages.borrow().iter()) {
            let value = serde_json::to_value(forwarded).expect("serialize");
            assert!(value.get("token").is_none());
        }
    }

    #[test]
    fn other_types_invoke_no_callback() {
        let document = MemoryWidgetDocument::default();
        let channel = MemoryMessageChannel::default();
        let (accepted, on_accept) = collector();
        let (messages, on_message) = collector();
        let params = InitParams::new("abc")
            .on_accept(on_accept)
            .on_message(on_message);
        let _handle = init_widget_with(&document, channel.clone(), params).expect("init");

        let outcomes = channel.post(json!({ "type": "ping" }));
        channel.post(json!({ "message": "untyped" }));
        channel.post(json!(42));

        assert_eq!(
            outcomes,
            vec![DispatchOutcome::Ignored(IgnoreReason::UnknownType(
                "ping".to_string()
            ))]
        );
        assert!(accepted.borrow().is_empty());
        assert!(messages.borrow().is_empty());
    }

    #[test]
    fn default_callbacks_absorb_routed_messages() {
        let document = MemoryWidgetDocument::default();
        let channel = MemoryMessageChannel::default();
        let _handle = init_widget_with(&document, channel.clone(), InitParams::new("abc"))
            .expect("init");

        assert_eq!(document.frames()[0].src, format!("{DEFAULT_WIDGET_SOURCE}?token=abc"));
        assert_eq!(
            channel.post(json!({
                "type": "accepted",
                "message": "done",
                "data": { "price": 10, "accepted": true }
            })),
            vec![DispatchOutcome::Accepted]
        );
        assert_eq!(
            channel.post(json!({ "type": "message", "message": "hi" })),
            vec![DispatchOutcome::Message]
        );
    }

    #[test]
    fn dispose_stops_routing() {
        let document = MemoryWidgetDocument::default();
        let channel = MemoryMessageChannel::default();
        let (accepted, on_accept) = collector();
        let params = InitParams::new("abc").on_accept(on_accept);
        let handle = init_widget_with(&document, channel.clone(), params).expect("init");

        handle.dispose().expect("dispose");
        channel.post(json!({ "type": "accepted" }));

        assert_eq!(channel.listener_count(), 0);
        assert!(accepted.borrow().is_empty());
        assert_eq!(document.frame_count(), 1);
    }

    #[test]
    fn repeated_init_yields_independent_handles() {
        let document = MemoryWidgetDocument::default();
        let channel = MemoryMessageChannel::default();
        let (first_seen, first) = collector();
        let (second_seen, second) = collector();
        let first_handle =
            init_widget_with(&document, channel.clone(), InitParams::new("one").on_accept(first))
                .expect("init first");
        let second_handle =
            init_widget_with(&document, channel.clone(), InitParams::new("two").on_accept(second))
                .expect("init second");
        assert_ne!(first_handle.subscription(), second_handle.subscription());
        assert_eq!(document.frame_count(), 2);

        first_handle.dispose().expect("dispose");
        channel.post(json!({ "type": "accepted" }));

        assert!(first_seen.borrow().is_empty());
        assert_eq!(second_seen.borrow().len(), 1);
        second_handle.dispose().expect("dispose");
    }

    #[test]
    fn environment_failures_propagate() {
        let document = MemoryWidgetDocument::default();
        let err = init_widget_with(&document, RejectingChannel, InitParams::new("abc"))
            .expect_err("listener registration should fail");
        assert_eq!(err, EmbedError::WindowUnavailable);
        assert_eq!(document.frame_count(), 1);

        let channel = MemoryMessageChannel::default();
        let err = init_widget_with(&BodylessDocument, channel.clone(), InitParams::new("abc"))
            .expect_err("iframe insertion should fail");
        assert_eq!(err, EmbedError::BodyUnavailable);
        assert_eq!(channel.listener_count(), 0);
    }

    #[test]
    #[should_panic(expected = "host callback failed")]
    fn callback_panics_are_not_caught() {
        let document = MemoryWidgetDocument::default();
        let channel = MemoryMessageChannel::default();
        let params = InitParams::new("abc").on_accept(|_| panic!("host callback failed"));
        let _handle = init_widget_with(&document, channel.clone(), params).expect("init");
        channel.post(json!({ "type": "accepted" }));
    }
}
