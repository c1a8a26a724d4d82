//! Seam to the external substitution engine.
use std::fmt;

use crate::backend::{PlaceholderHandle, Viewer};

/// Resolves raw label text against a viewer or against nobody (broadcast).
///
/// With no engine installed the raw text is returned unchanged.
#[derive(Clone, Default)]
pub struct TextResolver {
    engine: Option<PlaceholderHandle>,
}

impl TextResolver {
    pub fn new(engine: Option<PlaceholderHandle>) -> Self {
        Self { engine }
    }

    /// Resolver without an engine.
    pub fn passthrough() -> Self {
        Self { engine: None }
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn resolve(&self, raw: &str, viewer: Option<&Viewer>) -> String {
        match (&self.engine, viewer) {
            (Some(engine), Some(viewer)) => engine.resolve(raw, viewer),
            (Some(engine), None) => engine.resolve_broadcast(raw),
            (None, _) => raw.to_string(),
        }
    }
}

impl fmt::Debug for TextResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextResolver")
            .field("engine", &self.engine.as_ref().map(|_| "<engine>"))
            .finish()
    }
}
