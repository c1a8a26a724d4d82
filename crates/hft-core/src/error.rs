use thiserror::Error;

use hft_model::ModelError;

use crate::{backend::RenderError, store::StoreError};

/// Failure of an orchestrator operation.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("floating text '{0}' already exists")]
    AlreadyExists(String),

    #[error("floating text '{0}' does not exist")]
    NotFound(String),

    #[error("invalid floating text: {0}")]
    Model(#[from] ModelError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

pub type LabelResult<T> = Result<T, LabelError>;
