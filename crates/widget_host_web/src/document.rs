//! Browser document adapter inserting the widget iframe.

use widget_host::{EmbedError, FrameId, IframeSpec, WidgetDocument};

#[cfg(target_arch = "wasm32")]
use std::cell::Cell;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
thread_local! {
    static NEXT_FRAME_ID: Cell<u64> = const { Cell::new(1) };
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser document backed by `window.document`.
pub struct WebWidgetDocument;

impl WidgetDocument for WebWidgetDocument {
    fn append_iframe(&self, spec: &IframeSpec) -> Result<FrameId, EmbedError> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window().ok_or(EmbedError::WindowUnavailable)?;
            let document = window.document().ok_or(EmbedError::DocumentUnavailable)?;
            let body = document.body().ok_or(EmbedError::BodyUnavailable)?;
            let frame = document
                .create_element("iframe")
                .map_err(|err| EmbedError::Dom(format!("failed to create iframe: {err:?}")))?
                .dyn_into::<web_sys::HtmlIFrameElement>()
                .map_err(|_| EmbedError::Dom("failed to cast iframe element".to_string()))?;
            frame.set_src(&spec.src);
            frame.style().set_css_text(spec.style);
            body.append_child(&frame)
                .map_err(|err| EmbedError::Dom(format!("failed to append iframe: {err:?}")))?;
            Ok(NEXT_FRAME_ID.with(|next| {
                let id = next.get();
                next.set(id + 1);
                FrameId(id)
            }))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = spec;
            Err(EmbedError::Unsupported("iframe insertion"))
        }
    }
}
