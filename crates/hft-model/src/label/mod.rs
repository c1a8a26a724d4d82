mod definition;
pub use definition::{LabelDefinition, validate_name};
