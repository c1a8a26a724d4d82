use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    backend::{DrawHandle, PlaceholderHandle, ViewerHandle, no_viewers},
    render::RenderRegistry,
    resolver::TextResolver,
    scheduler::{RefreshContext, RefreshScheduler},
    store::LabelStore,
};

use super::Orchestrator;

/// Wires the external collaborators into an [`Orchestrator`].
///
/// Only the store and the draw primitive are mandatory. Without a viewer
/// source every refresh is a broadcast; without a substitution engine text
/// is shown literally.
pub struct OrchestratorBuilder {
    store: LabelStore,
    draw: DrawHandle,
    viewers: Option<ViewerHandle>,
    placeholders: Option<PlaceholderHandle>,
}

impl OrchestratorBuilder {
    pub(super) fn new(store: LabelStore, draw: DrawHandle) -> Self {
        Self {
            store,
            draw,
            viewers: None,
            placeholders: None,
        }
    }

    pub fn viewers(mut self, viewers: ViewerHandle) -> Self {
        self.viewers = Some(viewers);
        self
    }

    pub fn placeholders(mut self, placeholders: PlaceholderHandle) -> Self {
        self.placeholders = Some(placeholders);
        self
    }

    pub fn build(self) -> Orchestrator {
        let registry = Arc::new(RenderRegistry::new(self.draw));
        let ctx = RefreshContext::new(
            registry.clone(),
            TextResolver::new(self.placeholders),
            self.viewers.unwrap_or_else(no_viewers),
        );

        Orchestrator {
            store: Mutex::new(self.store),
            registry,
            scheduler: RefreshScheduler::new(ctx),
        }
    }
}
