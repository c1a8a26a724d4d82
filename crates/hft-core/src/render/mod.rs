//! Name-keyed set of labels currently drawn in the world.
//!
//! Access is serialized by a short-lived mutex that is never held across an
//! `.await`; every operation here is synchronous.
mod label;
pub use label::RenderedLabel;

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, trace};

use hft_model::{LabelDefinition, LabelName};

use crate::backend::{DrawHandle, RenderError, Viewer, ViewerId};

pub struct RenderRegistry {
    backend: DrawHandle,
    labels: Mutex<HashMap<LabelName, RenderedLabel>>,
}

impl RenderRegistry {
    pub fn new(backend: DrawHandle) -> Self {
        Self {
            backend,
            labels: Mutex::new(HashMap::new()),
        }
    }

    /// Draw `def.text` for `name`, creating the object if needed.
    ///
    /// `viewer = None` draws for everyone; `Some` draws for that viewer only
    /// (used when a viewer joins or changes dimension).
    pub fn show(
        &self,
        name: &str,
        def: &LabelDefinition,
        viewer: Option<&Viewer>,
    ) -> Result<(), RenderError> {
        let mut labels = self.labels();
        let label = match labels.entry(name.to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(RenderedLabel::create(&self.backend, def)?),
        };
        label.push(&def.text, viewer);
        debug!(label = name, viewer = ?viewer.map(|v| v.id), "label shown");
        Ok(())
    }

    /// Make sure an object exists for `name` without drawing it.
    ///
    /// Returns `true` if it had to be created.
    pub fn ensure(&self, name: &str, def: &LabelDefinition) -> Result<bool, RenderError> {
        let mut labels = self.labels();
        if labels.contains_key(name) {
            return Ok(false);
        }
        labels.insert(name.to_string(), RenderedLabel::create(&self.backend, def)?);
        trace!(label = name, "label object created");
        Ok(true)
    }

    /// Redraw only if `text` differs from what was last pushed.
    ///
    /// Without a viewer the comparison is against the last broadcast text;
    /// with one, against the last text that viewer received. Returns `true`
    /// if a draw happened. Unknown names are ignored.
    pub fn update_if_changed(&self, name: &str, text: &str, viewer: Option<&Viewer>) -> bool {
        let mut labels = self.labels();
        let Some(label) = labels.get_mut(name) else {
            return false;
        };
        if label.shown(viewer) == Some(text) {
            return false;
        }
        label.push(text, viewer);
        true
    }

    /// Remove the drawn object and forget the label. Returns `true` if it existed.
    pub fn hide(&self, name: &str) -> bool {
        let removed = self.labels().remove(name);
        match removed {
            Some(label) => {
                drop(label);
                debug!(label = name, "label hidden");
                true
            }
            None => false,
        }
    }

    /// Hide every label. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let drained: Vec<_> = self.labels().drain().collect();
        let count = drained.len();
        drop(drained);
        if count > 0 {
            debug!(count, "all labels hidden");
        }
        count
    }

    /// Drop what every label remembers about `viewer`, so the next refresh
    /// draws to it again.
    pub fn forget_viewer(&self, viewer: ViewerId) {
        for label in self.labels().values_mut() {
            label.forget_viewer(viewer);
        }
    }

    /// Drop per-viewer memory of `name` for viewers not in `online`.
    pub fn retain_viewers(&self, name: &str, online: &[Viewer]) {
        if let Some(label) = self.labels().get_mut(name) {
            label.retain_viewers(online);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.labels().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.labels().len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels().is_empty()
    }

    /// Names of all drawn labels, sorted.
    pub fn names(&self) -> Vec<LabelName> {
        let mut names: Vec<_> = self.labels().keys().cloned().collect();
        names.sort();
        names
    }

    /// Last broadcast text of `name`.
    pub fn last_text(&self, name: &str) -> Option<String> {
        self.labels()
            .get(name)
            .and_then(|l| l.last_text().map(str::to_string))
    }

    /// Last text `viewer` received for `name`.
    pub fn viewer_text(&self, name: &str, viewer: ViewerId) -> Option<String> {
        self.labels()
            .get(name)
            .and_then(|l| l.viewer_text(viewer).map(str::to_string))
    }

    fn labels(&self) -> MutexGuard<'_, HashMap<LabelName, RenderedLabel>> {
        self.labels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawCall, RecordingDrawer, viewer};
    use hft_model::{DimensionId, Position};
    use std::sync::Arc;

    fn welcome(text: &str) -> LabelDefinition {
        LabelDefinition::new_static(text, Position::new(0.0, 64.0, 0.0), DimensionId::OVERWORLD)
    }

    fn setup() -> (Arc<RecordingDrawer>, RenderRegistry) {
        let drawer = RecordingDrawer::new();
        let registry = RenderRegistry::new(drawer.clone());
        (drawer, registry)
    }

    #[test]
    fn show_creates_once_and_draws_exact_text() {
        let (drawer, registry) = setup();

        registry.show("welcome", &welcome("Hello"), None).unwrap();

        assert_eq!(drawer.draws(), vec![("Hello".to_string(), None)]);
        assert!(matches!(drawer.calls()[0], DrawCall::Create(_, ref t) if t == "Hello"));
        assert_eq!(registry.last_text("welcome").as_deref(), Some("Hello"));
    }

    #[test]
    fn show_again_reuses_the_object() {
        let (drawer, registry) = setup();

        registry.show("welcome", &welcome("Hello"), None).unwrap();
        registry.show("welcome", &welcome("Hi"), None).unwrap();

        let creates = drawer
            .calls()
            .iter()
            .filter(|c| matches!(c, DrawCall::Create(..)))
            .count();
        assert_eq!(creates, 1);
        assert_eq!(drawer.live_texts(), vec!["Hi".to_string()]);
        assert_eq!(drawer.draws().last().unwrap().0, "Hi");
    }

    #[test]
    fn targeted_show_draws_for_one_viewer() {
        let (drawer, registry) = setup();
        let alex = viewer(7, "alex");

        registry.show("welcome", &welcome("Hello"), Some(&alex)).unwrap();

        assert_eq!(drawer.draws(), vec![("Hello".to_string(), Some(alex.id))]);
        assert_eq!(registry.viewer_text("welcome", alex.id).as_deref(), Some("Hello"));
        assert_eq!(registry.last_text("welcome"), None);
    }

    #[test]
    fn broadcast_after_targeted_draw_restores_shared_text() {
        let (drawer, registry) = setup();
        let alex = viewer(7, "alex");
        registry.ensure("greet", &welcome("raw")).unwrap();

        assert!(registry.update_if_changed("greet", "hi server", None));
        assert!(registry.update_if_changed("greet", "hi alex", Some(&alex)));
        assert_eq!(registry.last_text("greet"), None);

        assert!(registry.update_if_changed("greet", "hi server", None));
        assert_eq!(drawer.live_texts(), vec!["hi server".to_string()]);
        // The object changed under alex, so alex is drawn again.
        assert_eq!(registry.viewer_text("greet", alex.id), None);
        assert!(registry.update_if_changed("greet", "hi alex", Some(&alex)));
    }

    #[test]
    fn render_unavailable_leaves_no_entry() {
        let (drawer, registry) = setup();
        drawer.refuse_creates();

        let err = registry.show("welcome", &welcome("Hello"), None).unwrap_err();

        assert!(matches!(err, RenderError::Unavailable(_)));
        assert!(!registry.contains("welcome"));
    }

    #[test]
    fn update_if_changed_suppresses_identical_broadcast_text() {
        let (drawer, registry) = setup();
        registry.ensure("clock", &welcome("raw")).unwrap();

        assert!(registry.update_if_changed("clock", "12:00", None));
        assert!(!registry.update_if_changed("clock", "12:00", None));
        assert!(registry.update_if_changed("clock", "12:01", None));

        let texts: Vec<_> = drawer.draws().into_iter().map(|(t, _)| t).collect();
        assert_eq!(texts, vec!["12:00", "12:01"]);
    }

    #[test]
    fn first_update_draws_even_when_text_equals_raw_text() {
        let (drawer, registry) = setup();
        registry.ensure("plain", &welcome("same")).unwrap();

        assert!(drawer.draws().is_empty());
        assert!(registry.update_if_changed("plain", "same", None));
        assert_eq!(drawer.draws(), vec![("same".to_string(), None)]);
    }

    #[test]
    fn per_viewer_suppression_is_independent() {
        let (drawer, registry) = setup();
        let (a, b) = (viewer(1, "a"), viewer(2, "b"));
        registry.ensure("hi", &welcome("raw")).unwrap();

        assert!(registry.update_if_changed("hi", "hi a", Some(&a)));
        assert!(registry.update_if_changed("hi", "hi b", Some(&b)));
        assert!(!registry.update_if_changed("hi", "hi a", Some(&a)));
        assert!(!registry.update_if_changed("hi", "hi b", Some(&b)));

        assert_eq!(
            drawer.draws(),
            vec![
                ("hi a".to_string(), Some(a.id)),
                ("hi b".to_string(), Some(b.id)),
            ]
        );
    }

    #[test]
    fn forget_viewer_forces_a_redraw() {
        let (_drawer, registry) = setup();
        let a = viewer(1, "a");
        registry.ensure("hi", &welcome("raw")).unwrap();
        assert!(registry.update_if_changed("hi", "x", Some(&a)));

        registry.forget_viewer(a.id);

        assert!(registry.update_if_changed("hi", "x", Some(&a)));
    }

    #[test]
    fn retain_viewers_prunes_offline_viewers() {
        let (_drawer, registry) = setup();
        let (a, b) = (viewer(1, "a"), viewer(2, "b"));
        registry.ensure("hi", &welcome("raw")).unwrap();
        registry.update_if_changed("hi", "x", Some(&a));
        registry.update_if_changed("hi", "x", Some(&b));

        registry.retain_viewers("hi", std::slice::from_ref(&b));

        assert_eq!(registry.viewer_text("hi", a.id), None);
        assert_eq!(registry.viewer_text("hi", b.id).as_deref(), Some("x"));
    }

    #[test]
    fn update_of_unknown_label_is_ignored() {
        let (drawer, registry) = setup();
        assert!(!registry.update_if_changed("ghost", "x", None));
        assert!(drawer.calls().is_empty());
    }

    #[test]
    fn hide_and_clear_remove_drawn_objects() {
        let (drawer, registry) = setup();
        registry.show("a", &welcome("A"), None).unwrap();
        registry.show("b", &welcome("B"), None).unwrap();
        registry.show("c", &welcome("C"), None).unwrap();

        assert!(registry.hide("a"));
        assert!(!registry.hide("a"));
        assert_eq!(drawer.live_objects(), 2);

        assert_eq!(registry.clear(), 2);
        assert_eq!(drawer.live_objects(), 0);
        assert!(registry.is_empty());
    }
}
