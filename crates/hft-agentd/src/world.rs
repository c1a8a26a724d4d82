use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;

use hft_core::backend::{Viewer, ViewerId, ViewerSource};
use hft_model::DimensionId;

/// In-memory list of connected viewers, driven by stdin events.
#[derive(Default)]
pub struct World {
    viewers: Mutex<BTreeMap<ViewerId, Viewer>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a viewer and return it.
    pub fn join(&self, id: ViewerId, name: impl Into<String>, dimension: DimensionId) -> Viewer {
        let viewer = Viewer::new(id, name, dimension);
        self.viewers().insert(id, viewer.clone());
        viewer
    }

    pub fn leave(&self, id: ViewerId) -> Option<Viewer> {
        self.viewers().remove(&id)
    }

    /// Move a viewer to `dimension`. `None` if the viewer is unknown.
    pub fn change_dimension(&self, id: ViewerId, dimension: DimensionId) -> Option<Viewer> {
        let mut viewers = self.viewers();
        let viewer = viewers.get_mut(&id)?;
        viewer.dimension = dimension;
        Some(viewer.clone())
    }

    fn viewers(&self) -> MutexGuard<'_, BTreeMap<ViewerId, Viewer>> {
        self.viewers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ViewerSource for World {
    async fn online_viewers(&self) -> Vec<Viewer> {
        self.viewers().values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tracks_viewer_events() {
        let world = World::new();
        let id = ViewerId::new(1);

        world.join(id, "alex", DimensionId::OVERWORLD);
        world.join(ViewerId::new(2), "sam", DimensionId::OVERWORLD);
        let moved = world.change_dimension(id, DimensionId::THE_END).unwrap();
        assert_eq!(moved.dimension, DimensionId::THE_END);
        assert!(world.change_dimension(ViewerId::new(9), DimensionId::NETHER).is_none());

        assert_eq!(world.leave(ViewerId::new(2)).map(|v| v.name), Some("sam".to_string()));
        let online = world.online_viewers().await;
        assert_eq!(online.len(), 1);
        assert_eq!(online[0].dimension, DimensionId::THE_END);
    }
}
