use std::sync::Arc;

use super::Viewer;

/// Text substitution engine.
pub trait Placeholders: Send + Sync + 'static {
    /// Expand `text` for one viewer.
    fn resolve(&self, text: &str, viewer: &Viewer) -> String;

    /// Expand `text` with server-wide values only.
    fn resolve_broadcast(&self, text: &str) -> String;
}

/// Shared handle to the substitution engine.
pub type PlaceholderHandle = Arc<dyn Placeholders>;
