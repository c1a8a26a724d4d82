use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer identifier of a spatial partition ("dimension") of the world.
///
/// The value is opaque to this crate: it is stored and handed to the draw
/// primitive unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionId(i32);

impl DimensionId {
    pub const OVERWORLD: Self = Self(0);
    pub const NETHER: Self = Self(1);
    pub const THE_END: Self = Self(2);

    /// Wrap a raw dimension id.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for DimensionId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<DimensionId> for i32 {
    fn from(d: DimensionId) -> Self {
        d.0
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
