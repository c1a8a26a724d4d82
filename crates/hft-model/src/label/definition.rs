use serde::{Deserialize, Serialize};

use crate::{
    domain::{DimensionId, Position},
    error::{ModelError, ModelResult},
    kind::LabelKind,
};

/// Durable description of one floating text label.
///
/// The label name is not part of the definition: it is the key under which
/// the definition is stored.
///
/// On disk a definition is encoded as
/// `{"text": .., "pos": {"x","y","z"}, "dimid": <int>, "type": "static"|"dynamic", "interval"?: <int>}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LabelRecord", into = "LabelRecord")]
pub struct LabelDefinition {
    /// Raw content; may contain substitution placeholders.
    pub text: String,
    /// World coordinates.
    pub position: Position,
    /// Spatial partition the label lives in.
    pub dimension: DimensionId,
    /// Static or dynamic behaviour, fixed at creation time.
    pub kind: LabelKind,
}

impl LabelDefinition {
    /// Definition of a static label.
    pub fn new_static(text: impl Into<String>, position: Position, dimension: DimensionId) -> Self {
        Self {
            text: text.into(),
            position,
            dimension,
            kind: LabelKind::Static,
        }
    }

    /// Definition of a dynamic label refreshed every `interval_ms` milliseconds.
    pub fn new_dynamic(
        text: impl Into<String>,
        position: Position,
        dimension: DimensionId,
        interval_ms: Option<i64>,
    ) -> Self {
        Self {
            text: text.into(),
            position,
            dimension,
            kind: LabelKind::Dynamic { interval_ms },
        }
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.kind.is_dynamic()
    }
}

/// Validate a label name before it is used as a store key.
///
/// Rules:
/// - not empty or whitespace-only;
/// - no control characters.
pub fn validate_name(name: &str) -> ModelResult<()> {
    if name.trim().is_empty() || name.chars().any(char::is_control) {
        return Err(ModelError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Wire shape of [`LabelDefinition`].
#[derive(Serialize, Deserialize)]
struct LabelRecord {
    text: String,
    pos: Position,
    dimid: DimensionId,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interval: Option<i64>,
}

impl TryFrom<LabelRecord> for LabelDefinition {
    type Error = ModelError;
    fn try_from(r: LabelRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: LabelKind::from_tag(&r.kind, r.interval)?,
            text: r.text,
            position: r.pos,
            dimension: r.dimid,
        })
    }
}

impl From<LabelDefinition> for LabelRecord {
    fn from(d: LabelDefinition) -> Self {
        Self {
            kind: d.kind.kind().to_string(),
            interval: d.kind.interval_ms(),
            text: d.text,
            pos: d.position,
            dimid: d.dimension,
        }
    }
}
