//! Recording fakes of the external collaborators, shared by unit tests.
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, AtomicUsize, Ordering},
};

use async_trait::async_trait;

use hft_model::{DimensionId, Position};

use crate::backend::{
    DrawBackend, Placeholders, RenderError, TextHandle, Viewer, ViewerId, ViewerSource,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Create(TextHandle, String),
    SetText(TextHandle, String),
    Draw(TextHandle, Option<ViewerId>),
    Remove(TextHandle, Option<ViewerId>),
}

/// Draw primitive that records every call.
#[derive(Default)]
pub struct RecordingDrawer {
    next: AtomicU64,
    calls: Mutex<Vec<DrawCall>>,
    texts: Mutex<std::collections::HashMap<TextHandle, String>>,
    drawn: Mutex<Vec<(String, Option<ViewerId>)>>,
    refuse: std::sync::atomic::AtomicBool,
}

impl RecordingDrawer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every following `create` fail.
    pub fn refuse_creates(&self) {
        self.refuse.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
        self.drawn.lock().unwrap().clear();
    }

    /// Texts visible at draw time, in order: `(text, viewer)`.
    pub fn draws(&self) -> Vec<(String, Option<ViewerId>)> {
        self.drawn.lock().unwrap().clone()
    }

    /// Handles created and not yet removed for everyone.
    pub fn live_objects(&self) -> usize {
        self.texts.lock().unwrap().len()
    }

    pub fn live_texts(&self) -> Vec<String> {
        let mut texts: Vec<String> = self.texts.lock().unwrap().values().cloned().collect();
        texts.sort();
        texts
    }

    fn record(&self, call: DrawCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DrawBackend for RecordingDrawer {
    fn create(
        &self,
        _position: Position,
        _dimension: DimensionId,
        text: &str,
    ) -> Result<TextHandle, RenderError> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(RenderError::Unavailable("refused by test".into()));
        }
        let handle = TextHandle::new(self.next.fetch_add(1, Ordering::SeqCst) + 1);
        self.texts.lock().unwrap().insert(handle, text.to_string());
        self.record(DrawCall::Create(handle, text.to_string()));
        Ok(handle)
    }

    fn set_text(&self, handle: TextHandle, text: &str) {
        self.texts.lock().unwrap().insert(handle, text.to_string());
        self.record(DrawCall::SetText(handle, text.to_string()));
    }

    fn draw(&self, handle: TextHandle, viewer: Option<&Viewer>) {
        let text = self.texts.lock().unwrap().get(&handle).cloned().unwrap_or_default();
        self.drawn.lock().unwrap().push((text, viewer.map(|v| v.id)));
        self.record(DrawCall::Draw(handle, viewer.map(|v| v.id)));
    }

    fn remove(&self, handle: TextHandle, viewer: Option<&Viewer>) {
        if viewer.is_none() {
            self.texts.lock().unwrap().remove(&handle);
        }
        self.record(DrawCall::Remove(handle, viewer.map(|v| v.id)));
    }
}

/// Viewer list controlled by the test, with enumeration bookkeeping.
#[derive(Default)]
pub struct FixedViewers {
    viewers: Mutex<Vec<Viewer>>,
    polls: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl FixedViewers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, viewers: Vec<Viewer>) {
        *self.viewers.lock().unwrap() = viewers;
    }

    /// Number of enumerations so far (one per refresh tick).
    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    /// Highest number of enumerations in flight at the same time.
    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ViewerSource for FixedViewers {
    async fn online_viewers(&self) -> Vec<Viewer> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        let out = self.viewers.lock().unwrap().clone();
        self.active.fetch_sub(1, Ordering::SeqCst);
        out
    }
}

/// Substitution engine replacing `{player}` and `{tick}`.
///
/// `{tick}` expands to a counter bumped by [`TagPlaceholders::advance`].
#[derive(Default)]
pub struct TagPlaceholders {
    tick: AtomicU64,
    broadcast_calls: AtomicUsize,
    viewer_calls: AtomicUsize,
}

impl TagPlaceholders {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn advance(&self) {
        self.tick.fetch_add(1, Ordering::SeqCst);
    }

    pub fn broadcast_calls(&self) -> usize {
        self.broadcast_calls.load(Ordering::SeqCst)
    }

    pub fn viewer_calls(&self) -> usize {
        self.viewer_calls.load(Ordering::SeqCst)
    }

    fn expand(&self, text: &str, player: &str) -> String {
        text.replace("{player}", player)
            .replace("{tick}", &self.tick.load(Ordering::SeqCst).to_string())
    }
}

impl Placeholders for TagPlaceholders {
    fn resolve(&self, text: &str, viewer: &Viewer) -> String {
        self.viewer_calls.fetch_add(1, Ordering::SeqCst);
        self.expand(text, &viewer.name)
    }

    fn resolve_broadcast(&self, text: &str) -> String {
        self.broadcast_calls.fetch_add(1, Ordering::SeqCst);
        self.expand(text, "server")
    }
}

pub fn viewer(id: u64, name: &str) -> Viewer {
    Viewer::new(ViewerId::new(id), name, DimensionId::OVERWORLD)
}
