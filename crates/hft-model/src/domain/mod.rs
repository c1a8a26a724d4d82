mod position;
pub use position::Position;

mod dimension;
pub use dimension::DimensionId;

mod constants;
pub use constants::{CLOCK_LABEL_NAME, DEFAULT_REFRESH_MS};

/// Unique name of a floating text label.
///
/// Names are the only identity a label has: the store, the render registry
/// and the refresh scheduler are all keyed by it.
pub type LabelName = String;
