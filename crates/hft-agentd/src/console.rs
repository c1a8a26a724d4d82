use std::{
    collections::HashMap,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use tracing::{info, warn};

use hft_core::backend::{DrawBackend, RenderError, TextHandle, Viewer};
use hft_model::{DimensionId, Position};

struct ConsoleObject {
    position: Position,
    dimension: DimensionId,
    text: String,
}

/// Draw backend that only logs what a real world would show.
#[derive(Default)]
pub struct ConsoleDrawer {
    next: AtomicU64,
    objects: Mutex<HashMap<TextHandle, ConsoleObject>>,
}

impl ConsoleDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects currently in the world.
    pub fn len(&self) -> usize {
        self.objects().len()
    }

    fn objects(&self) -> MutexGuard<'_, HashMap<TextHandle, ConsoleObject>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DrawBackend for ConsoleDrawer {
    fn create(
        &self,
        position: Position,
        dimension: DimensionId,
        text: &str,
    ) -> Result<TextHandle, RenderError> {
        let raw = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        let handle = TextHandle::new(raw);
        self.objects().insert(
            handle,
            ConsoleObject {
                position,
                dimension,
                text: text.to_string(),
            },
        );
        info!(%handle, %position, %dimension, "text object created");
        Ok(handle)
    }

    fn set_text(&self, handle: TextHandle, text: &str) {
        match self.objects().get_mut(&handle) {
            Some(obj) => obj.text = text.to_string(),
            None => warn!(%handle, "set_text on unknown text object"),
        }
    }

    fn draw(&self, handle: TextHandle, viewer: Option<&Viewer>) {
        let objects = self.objects();
        let Some(obj) = objects.get(&handle) else {
            warn!(%handle, "draw of unknown text object");
            return;
        };
        match viewer {
            Some(v) => info!(
                %handle, viewer = %v.name, position = %obj.position, dimension = %obj.dimension,
                "draw {:?}", obj.text
            ),
            None => info!(
                %handle, position = %obj.position, dimension = %obj.dimension,
                "draw {:?} for everyone", obj.text
            ),
        }
    }

    fn remove(&self, handle: TextHandle, viewer: Option<&Viewer>) {
        match viewer {
            Some(v) => info!(%handle, viewer = %v.name, "text object hidden for viewer"),
            None => {
                self.objects().remove(&handle);
                info!(%handle, "text object removed");
            }
        }
    }
}
