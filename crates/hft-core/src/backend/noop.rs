use async_trait::async_trait;

use super::{Viewer, ViewerSource};

/// Viewer source with nobody online.
///
/// Dynamic labels then always take the broadcast path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoViewers;

#[async_trait]
impl ViewerSource for NoViewers {
    #[inline]
    async fn online_viewers(&self) -> Vec<Viewer> {
        Vec::new()
    }
}
