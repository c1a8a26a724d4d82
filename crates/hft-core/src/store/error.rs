use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode labels: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| StoreError::Io { path, source }
    }
}

/// Outcome of the implicit save that follows every store mutation.
///
/// The in-memory mutation is kept either way; a failure only means the file
/// lags behind memory until the next successful save.
#[derive(Debug)]
#[must_use]
pub enum Persistence {
    Saved,
    Failed(StoreError),
}

impl Persistence {
    #[inline]
    pub fn is_saved(&self) -> bool {
        matches!(self, Persistence::Saved)
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Persistence::Saved => None,
            Persistence::Failed(e) => Some(e),
        }
    }
}

impl From<Result<(), StoreError>> for Persistence {
    fn from(r: Result<(), StoreError>) -> Self {
        match r {
            Ok(()) => Persistence::Saved,
            Err(e) => Persistence::Failed(e),
        }
    }
}
