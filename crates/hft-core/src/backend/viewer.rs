use std::{fmt, sync::Arc};

use async_trait::async_trait;

use hft_model::DimensionId;

/// Stable id of a connected viewer (player session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewerId(u64);

impl ViewerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A connected client that may receive rendered labels.
///
/// Also serves as the viewer context handed to the substitution engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub id: ViewerId,
    pub name: String,
    pub dimension: DimensionId,
}

impl Viewer {
    pub fn new(id: ViewerId, name: impl Into<String>, dimension: DimensionId) -> Self {
        Self {
            id,
            name: name.into(),
            dimension,
        }
    }
}

/// Enumerates currently connected viewers.
#[async_trait]
pub trait ViewerSource: Send + Sync + 'static {
    async fn online_viewers(&self) -> Vec<Viewer>;
}

/// Shared handle to the viewer source.
pub type ViewerHandle = Arc<dyn ViewerSource>;
