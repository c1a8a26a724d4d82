use std::collections::HashMap;

use tracing::trace;

use hft_model::LabelDefinition;

use crate::backend::{DrawHandle, RenderError, TextHandle, Viewer, ViewerId};

/// One drawn world-text object.
///
/// Owns its [`TextHandle`] exclusively: dropping a `RenderedLabel` removes
/// the object from the draw primitive.
pub struct RenderedLabel {
    handle: TextHandle,
    backend: DrawHandle,
    /// Text currently held by the primitive object.
    current: String,
    /// Last text pushed by a broadcast draw; `None` until the first one.
    last_text: Option<String>,
    /// Last text pushed to each viewer by a targeted draw.
    viewer_texts: HashMap<ViewerId, String>,
}

impl RenderedLabel {
    pub(crate) fn create(backend: &DrawHandle, def: &LabelDefinition) -> Result<Self, RenderError> {
        let handle = backend.create(def.position, def.dimension, &def.text)?;
        Ok(Self {
            handle,
            backend: DrawHandle::clone(backend),
            current: def.text.clone(),
            last_text: None,
            viewer_texts: HashMap::new(),
        })
    }

    pub fn handle(&self) -> TextHandle {
        self.handle
    }

    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    pub fn viewer_text(&self, viewer: ViewerId) -> Option<&str> {
        self.viewer_texts.get(&viewer).map(String::as_str)
    }

    /// Last text pushed to `viewer`, or the broadcast text when `viewer` is `None`.
    pub(crate) fn shown(&self, viewer: Option<&Viewer>) -> Option<&str> {
        match viewer {
            None => self.last_text(),
            Some(v) => self.viewer_text(v.id),
        }
    }

    /// Set the text (only if it differs from what the object holds) and draw.
    ///
    /// A targeted push that changes the object invalidates the broadcast
    /// memory, and a broadcast that changes it invalidates every viewer's:
    /// the next draw of the other kind must go through.
    pub(crate) fn push(&mut self, text: &str, viewer: Option<&Viewer>) {
        if self.current != text {
            self.backend.set_text(self.handle, text);
            self.current = text.to_string();
            match viewer {
                Some(_) => self.last_text = None,
                None => self.viewer_texts.clear(),
            }
        }
        self.backend.draw(self.handle, viewer);
        trace!(handle = %self.handle, viewer = ?viewer.map(|v| v.id), "label drawn");

        match viewer {
            None => self.last_text = Some(text.to_string()),
            Some(v) => {
                self.viewer_texts.insert(v.id, text.to_string());
            }
        }
    }

    pub(crate) fn forget_viewer(&mut self, viewer: ViewerId) {
        self.viewer_texts.remove(&viewer);
    }

    pub(crate) fn retain_viewers(&mut self, online: &[Viewer]) {
        self.viewer_texts
            .retain(|id, _| online.iter().any(|v| v.id == *id));
    }
}

impl Drop for RenderedLabel {
    fn drop(&mut self) {
        self.backend.remove(self.handle, None);
        trace!(handle = %self.handle, "label object removed");
    }
}
