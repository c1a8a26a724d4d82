use std::{fmt, time::Duration};

use crate::{DEFAULT_REFRESH_MS, ModelError, ModelResult};

/// Behaviour of a label.
///
/// The variant is chosen once, when the label is created, and never changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    /// Fixed content, drawn once and re-drawn only on edit or viewer events.
    Static,
    /// Content re-resolved on a timer.
    Dynamic {
        /// Refresh period in milliseconds, exactly as it was supplied.
        ///
        /// Absent or non-positive values are kept as-is and only normalized
        /// by [`LabelKind::refresh_interval`].
        interval_ms: Option<i64>,
    },
}

impl LabelKind {
    pub const STATIC_TAG: &'static str = "static";
    pub const DYNAMIC_TAG: &'static str = "dynamic";

    /// Dynamic kind with an explicit interval.
    pub const fn dynamic(interval_ms: i64) -> Self {
        Self::Dynamic {
            interval_ms: Some(interval_ms),
        }
    }

    /// Build a kind from its on-disk tag and optional interval.
    ///
    /// The interval is dropped for static labels.
    pub fn from_tag(tag: &str, interval_ms: Option<i64>) -> ModelResult<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            Self::STATIC_TAG => Ok(Self::Static),
            Self::DYNAMIC_TAG => Ok(Self::Dynamic { interval_ms }),
            other => Err(ModelError::UnknownKind(other.to_string())),
        }
    }

    /// Returns the kind as a static string.
    pub fn kind(&self) -> &'static str {
        match self {
            LabelKind::Static => Self::STATIC_TAG,
            LabelKind::Dynamic { .. } => Self::DYNAMIC_TAG,
        }
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, LabelKind::Dynamic { .. })
    }

    /// Raw interval as stored; `None` for static labels.
    pub fn interval_ms(&self) -> Option<i64> {
        match self {
            LabelKind::Static => None,
            LabelKind::Dynamic { interval_ms } => *interval_ms,
        }
    }

    /// Effective refresh period of a dynamic label.
    ///
    /// Returns `None` for static labels. A missing or non-positive interval
    /// falls back to [`DEFAULT_REFRESH_MS`].
    pub fn refresh_interval(&self) -> Option<Duration> {
        match self {
            LabelKind::Static => None,
            LabelKind::Dynamic {
                interval_ms: Some(ms),
            } if *ms > 0 => Some(Duration::from_millis(*ms as u64)),
            LabelKind::Dynamic { .. } => Some(Duration::from_millis(DEFAULT_REFRESH_MS)),
        }
    }
}

impl Default for LabelKind {
    fn default() -> Self {
        LabelKind::Static
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}
