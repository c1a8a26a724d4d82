use std::{borrow::Cow, fmt, sync::Arc};

use tracing::trace;

use hft_model::{CLOCK_LABEL_NAME, LabelDefinition};
use hft_observe::{format_wall_clock, local_now};

use crate::{
    backend::{RenderError, ViewerHandle, no_viewers},
    render::RenderRegistry,
    resolver::TextResolver,
};

/// Prefix of the built-in clock label content.
pub const CLOCK_PREFIX: &str = "Current time: ";

/// Everything a refresh task needs, shared by all tasks of one scheduler.
#[derive(Clone)]
pub struct RefreshContext {
    registry: Arc<RenderRegistry>,
    resolver: TextResolver,
    viewers: ViewerHandle,
}

impl RefreshContext {
    pub fn new(registry: Arc<RenderRegistry>, resolver: TextResolver, viewers: ViewerHandle) -> Self {
        Self {
            registry,
            resolver,
            viewers,
        }
    }

    /// Context with no viewers and no substitution engine.
    pub fn detached(registry: Arc<RenderRegistry>) -> Self {
        Self::new(registry, TextResolver::passthrough(), no_viewers())
    }

    pub fn registry(&self) -> &Arc<RenderRegistry> {
        &self.registry
    }

    pub fn resolver(&self) -> &TextResolver {
        &self.resolver
    }

    pub fn viewers(&self) -> &ViewerHandle {
        &self.viewers
    }

    /// Replace the substitution engine seam and return the updated context.
    pub fn with_resolver(mut self, resolver: TextResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the viewer source and return the updated context.
    pub fn with_viewers(mut self, viewers: ViewerHandle) -> Self {
        self.viewers = viewers;
        self
    }

    /// One refresh pass for a dynamic label.
    ///
    /// 1. ensure the drawn object exists;
    /// 2. with viewers online, resolve and redraw per viewer (each viewer
    ///    only when its text changed), then prune viewers that left;
    /// 3. with nobody online, resolve once for broadcast and redraw only
    ///    when the broadcast text changed.
    pub(crate) async fn refresh_once(
        &self,
        name: &str,
        def: &LabelDefinition,
    ) -> Result<(), RenderError> {
        self.registry.ensure(name, def)?;

        let online = self.viewers.online_viewers().await;
        let base = base_text(name, def);

        if online.is_empty() {
            let text = self.resolver.resolve(&base, None);
            if self.registry.update_if_changed(name, &text, None) {
                trace!(label = name, text = %text, "broadcast text updated");
            }
            return Ok(());
        }

        for viewer in &online {
            let text = self.resolver.resolve(&base, Some(viewer));
            if self.registry.update_if_changed(name, &text, Some(viewer)) {
                trace!(label = name, viewer = %viewer.id, text = %text, "viewer text updated");
            }
        }
        self.registry.retain_viewers(name, &online);
        Ok(())
    }
}

impl fmt::Debug for RefreshContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshContext")
            .field("labels", &self.registry.len())
            .field("resolver", &self.resolver)
            .field("viewers", &"<source>")
            .finish()
    }
}

/// Content a label starts from before substitution.
///
/// The clock label ignores its stored text and shows the local time.
pub(crate) fn base_text<'a>(name: &str, def: &'a LabelDefinition) -> Cow<'a, str> {
    if name == CLOCK_LABEL_NAME {
        Cow::Owned(format!("{CLOCK_PREFIX}{}", format_wall_clock(local_now())))
    } else {
        Cow::Borrowed(def.text.as_str())
    }
}
