//! External collaborators of the label runtime.
//!
//! The runtime never draws, enumerates players or expands placeholders on its
//! own. Hosts implement these traits and inject them into the
//! [`crate::orchestrator::Orchestrator`]:
//! - [`DrawBackend`]: the world-text drawing primitive
//! - [`ViewerSource`]: connected viewers
//! - [`Placeholders`]: the substitution engine (optional)
mod draw;
pub use draw::{DrawBackend, DrawHandle, RenderError, TextHandle};

mod viewer;
pub use viewer::{Viewer, ViewerHandle, ViewerId, ViewerSource};

mod placeholder;
pub use placeholder::{PlaceholderHandle, Placeholders};

mod noop;
pub use noop::NoViewers;

use std::sync::Arc;

/// Viewer source that never reports anyone online.
#[inline]
pub fn no_viewers() -> ViewerHandle {
    Arc::new(NoViewers)
}
