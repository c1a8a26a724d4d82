//! Keeps the store, the render registry and the refresh scheduler in step.
//!
//! Every operation takes the store lock first and holds it to the end, so
//! operations never interleave. The registry and scheduler locks are taken
//! only briefly inside and never across an `.await`.
mod builder;
pub use builder::OrchestratorBuilder;

use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use hft_model::{LabelDefinition, LabelKind, LabelName, ModelError, validate_name};

use crate::{
    backend::{DrawHandle, RenderError, Viewer},
    error::{LabelError, LabelResult},
    render::RenderRegistry,
    scheduler::RefreshScheduler,
    store::{LabelStore, Persistence},
};

pub struct Orchestrator {
    store: Mutex<LabelStore>,
    registry: Arc<RenderRegistry>,
    scheduler: RefreshScheduler,
}

impl Orchestrator {
    pub fn builder(store: LabelStore, draw: DrawHandle) -> OrchestratorBuilder {
        OrchestratorBuilder::new(store, draw)
    }

    /// Read the backing file and bring every label up.
    ///
    /// Static labels are shown to everyone, dynamic ones get a refresh task.
    /// Anything already running is torn down first, so calling this again
    /// leaves exactly what the file holds. On error nothing is touched.
    /// Returns the number of labels loaded.
    #[instrument(level = "debug", skip(self))]
    pub async fn load(&self) -> LabelResult<usize> {
        let mut store = self.store.lock().await;
        store.load()?;
        self.rebuild(&store).await;

        info!(count = store.len(), path = ?store.path(), "floating texts loaded");
        Ok(store.len())
    }

    /// Store and display a new label.
    ///
    /// An existing name is rejected without touching the store. If the label
    /// was stored but could not be drawn, it stays stored and
    /// [`LabelError::Render`] is returned.
    #[instrument(level = "debug", skip(self, def), fields(label = %name, kind = %def.kind))]
    pub async fn create(&self, name: &str, def: LabelDefinition) -> LabelResult<Persistence> {
        validate_name(name)?;
        if !def.position.is_finite() {
            return Err(ModelError::Invalid(format!("position {} is not finite", def.position)).into());
        }

        let mut store = self.store.lock().await;
        if store.contains(name) {
            return Err(LabelError::AlreadyExists(name.to_string()));
        }
        let persistence = store.add_or_update(name, def.clone());
        self.activate(name, &def).await?;

        info!(label = name, "floating text created");
        Ok(persistence)
    }

    /// Replace the text of an existing label and refresh what is shown.
    ///
    /// Dynamic labels get a fresh task so the new text is picked up at once.
    #[instrument(level = "debug", skip(self, text), fields(label = %name))]
    pub async fn edit(&self, name: &str, text: impl Into<String>) -> LabelResult<Persistence> {
        let mut store = self.store.lock().await;
        let persistence = store
            .set_text(name, text)
            .ok_or_else(|| LabelError::NotFound(name.to_string()))?;
        let def = store
            .get(name)
            .cloned()
            .ok_or_else(|| LabelError::NotFound(name.to_string()))?;
        self.activate(name, &def).await?;

        info!(label = name, "floating text updated");
        Ok(persistence)
    }

    /// Remove a label from the store and from the world.
    #[instrument(level = "debug", skip(self), fields(label = %name))]
    pub async fn delete(&self, name: &str) -> LabelResult<Persistence> {
        let mut store = self.store.lock().await;
        let persistence = store
            .remove(name)
            .ok_or_else(|| LabelError::NotFound(name.to_string()))?;
        self.scheduler.stop(name).await;
        self.registry.hide(name);

        info!(label = name, "floating text deleted");
        Ok(persistence)
    }

    /// Re-read the backing file and rebuild the runtime state from it.
    ///
    /// The file is read before anything is torn down: if it cannot be read
    /// or parsed, the error is returned and what is shown stays as it was.
    #[instrument(level = "debug", skip(self))]
    pub async fn reload(&self) -> LabelResult<usize> {
        let mut store = self.store.lock().await;
        let mut fresh = LabelStore::new(store.path());
        fresh.load()?;

        *store = fresh;
        self.rebuild(&store).await;

        info!(count = store.len(), "floating texts reloaded");
        Ok(store.len())
    }

    /// Show every label to a viewer that just connected.
    pub async fn viewer_joined(&self, viewer: &Viewer) {
        self.reshow(viewer, "viewer joined").await;
    }

    /// Show every label again to a viewer that moved to another dimension.
    pub async fn dimension_changed(&self, viewer: &Viewer) {
        self.reshow(viewer, "viewer changed dimension").await;
    }

    /// Stop every refresh task and remove everything drawn.
    ///
    /// The store is left as is.
    #[instrument(level = "debug", skip(self))]
    pub async fn shutdown(&self) {
        let _store = self.store.lock().await;
        let stopped = self.scheduler.stop_all().await;
        let hidden = self.registry.clear();
        info!(stopped, hidden, "floating texts shut down");
    }

    /// Snapshot of every stored definition.
    pub async fn definitions(&self) -> BTreeMap<LabelName, LabelDefinition> {
        self.store.lock().await.all().clone()
    }

    pub async fn get(&self, name: &str) -> Option<LabelDefinition> {
        self.store.lock().await.get(name).cloned()
    }

    pub fn registry(&self) -> &Arc<RenderRegistry> {
        &self.registry
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    #[instrument(level = "debug", skip(self, viewer), fields(viewer = %viewer.id, dimension = %viewer.dimension))]
    async fn reshow(&self, viewer: &Viewer, reason: &str) {
        let store = self.store.lock().await;
        self.registry.forget_viewer(viewer.id);

        for (name, def) in store.iter() {
            match def.kind {
                LabelKind::Static => {
                    if let Err(e) = self.registry.show(name, def, Some(viewer)) {
                        warn!(label = name, error = %e, "cannot show floating text to viewer");
                    }
                }
                LabelKind::Dynamic { .. } => {
                    if let Err(e) = self.scheduler.ensure_running(name, def).await {
                        warn!(label = name, error = %e, "cannot restart dynamic floating text");
                    }
                }
            }
        }
        info!(reason, count = store.len(), "floating texts shown to viewer");
    }

    /// Bring one label up according to its kind.
    ///
    /// Static labels are drawn directly; dynamic ones get a (new) task that
    /// draws on its first tick. Either way the object exists on success.
    async fn activate(&self, name: &str, def: &LabelDefinition) -> Result<(), RenderError> {
        match def.kind {
            LabelKind::Static => self.registry.show(name, def, None),
            LabelKind::Dynamic { .. } => self.scheduler.start(name, def).await.map(|_| ()),
        }
    }

    /// Replace the runtime state with what `store` holds.
    async fn rebuild(&self, store: &LabelStore) {
        if self.scheduler.is_running() || self.scheduler.task_count() > 0 {
            self.scheduler.stop_all().await;
        }
        self.registry.clear();
        for (name, def) in store.iter().filter(|(_, def)| !def.is_dynamic()) {
            if let Err(e) = self.registry.show(name, def, None) {
                warn!(label = name, error = %e, "cannot show floating text");
            }
        }
        self.scheduler.start_all(store.iter()).await;
    }
}
