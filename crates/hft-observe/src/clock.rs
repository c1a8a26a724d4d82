//! Local wall clock shared by log timestamps and the built-in clock label.
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::logger::object::timezone::get_or_detect_local_offset;

/// `YYYY-MM-DD HH:MM:SS`
pub const WALL_CLOCK_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Current time in the cached local offset (UTC if detection failed).
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(get_or_detect_local_offset())
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_wall_clock(at: OffsetDateTime) -> String {
    at.format(WALL_CLOCK_FORMAT)
        .unwrap_or_else(|_| "<invalid-time>".to_string())
}
