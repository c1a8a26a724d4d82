use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown label kind: {0}")]
    UnknownKind(String),

    #[error("invalid label name: {0:?}")]
    InvalidName(String),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
