pub mod backend;
pub mod command;
pub mod error;
pub mod orchestrator;
pub mod render;
pub mod resolver;
pub mod scheduler;
pub mod store;

#[cfg(test)]
mod testing;

pub mod prelude {
    pub use crate::backend::{
        DrawBackend, DrawHandle, PlaceholderHandle, Placeholders, RenderError, TextHandle, Viewer,
        ViewerHandle, ViewerId, ViewerSource,
    };
    pub use crate::command::{Command, CommandError, CommandOutput};
    pub use crate::error::{LabelError, LabelResult};
    pub use crate::orchestrator::{Orchestrator, OrchestratorBuilder};
    pub use crate::store::{LabelStore, Persistence, StoreError};
}
