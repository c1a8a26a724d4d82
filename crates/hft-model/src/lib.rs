mod domain;
pub use domain::{CLOCK_LABEL_NAME, DEFAULT_REFRESH_MS};
pub use domain::{DimensionId, LabelName, Position};

mod error;
pub use error::{ModelError, ModelResult};

mod kind;
pub use kind::LabelKind;

mod label;
pub use label::{LabelDefinition, validate_name};
