//! Host document contracts for iframe insertion.

use std::{cell::RefCell, rc::Rc};

use crate::{error::EmbedError, frame::IframeSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Identifier of an iframe inserted through a [`WidgetDocument`].
pub struct FrameId(pub u64);

/// Host service that owns the page document.
pub trait WidgetDocument {
    /// Creates an iframe from `spec` and appends it to the document body.
    ///
    /// # Errors
    ///
    /// Returns an error when the document or its body is unavailable or the DOM rejects the
    /// element.
    fn append_iframe(&self, spec: &IframeSpec) -> Result<FrameId, EmbedError>;
}

impl<D: WidgetDocument + ?Sized> WidgetDocument for &D {
    fn append_iframe(&self, spec: &IframeSpec) -> Result<FrameId, EmbedError> {
        (**self).append_iframe(spec)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Document that accepts every frame and renders nothing.
pub struct NoopWidgetDocument;

impl WidgetDocument for NoopWidgetDocument {
    fn append_iframe(&self, _spec: &IframeSpec) -> Result<FrameId, EmbedError> {
        Ok(FrameId(0))
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory document recording appended frames in insertion order.
pub struct MemoryWidgetDocument {
    frames: Rc<RefCell<Vec<IframeSpec>>>,
}

impl MemoryWidgetDocument {
    /// Returns a snapshot of the appended frames.
    pub fn frames(&self) -> Vec<IframeSpec> {
        self.frames.borrow().clone()
    }

    /// Returns the number of appended frames.
    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }
}

impl WidgetDocument for MemoryWidgetDocument {
    fn append_iframe(&self, spec: &IframeSpec) -> Result<FrameId, EmbedError> {
        let mut frames = self.frames.borrow_mut();
        frames.push(spec.clone());
        Ok(FrameId(frames.len() as u64))
    }
}
