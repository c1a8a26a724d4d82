use std::{fmt, sync::Arc};

use thiserror::Error;

use hft_model::{DimensionId, Position};

use super::Viewer;

/// Opaque id of one drawn world-text object, issued by a [`DrawBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextHandle(u64);

impl TextHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "text#{}", self.0)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The primitive refused to create the object (no world loaded, out of ids, ...).
    #[error("draw primitive unavailable: {0}")]
    Unavailable(String),
}

/// World-text drawing primitive.
///
/// Calls are synchronous and must not block for long: they are issued from
/// refresh tasks and command handlers alike.
pub trait DrawBackend: Send + Sync + 'static {
    /// Create a text object at `position` in `dimension`.
    ///
    /// Nothing is shown until [`DrawBackend::draw`] is called.
    fn create(
        &self,
        position: Position,
        dimension: DimensionId,
        text: &str,
    ) -> Result<TextHandle, RenderError>;

    /// Replace the text held by the object.
    fn set_text(&self, handle: TextHandle, text: &str);

    /// Show the object to one viewer, or to every viewer when `viewer` is `None`.
    fn draw(&self, handle: TextHandle, viewer: Option<&Viewer>);

    /// Remove the object from one viewer, or destroy it for everyone when `viewer` is `None`.
    fn remove(&self, handle: TextHandle, viewer: Option<&Viewer>);
}

/// Shared handle to the draw primitive.
pub type DrawHandle = Arc<dyn DrawBackend>;
