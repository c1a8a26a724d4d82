//! Common model-level constants.

/// Refresh period applied to a dynamic label whose interval is absent or not positive.
pub const DEFAULT_REFRESH_MS: u64 = 1_000;

/// Reserved label name whose content is the current local wall-clock time.
///
/// A label with this name ignores its stored text; the refresh loop formats the clock instead.
pub const CLOCK_LABEL_NAME: &str = "time_text";
