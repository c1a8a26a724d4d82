use std::fmt;

use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

use crate::logger::object::timezone::{LoggerTimeZone, get_or_detect_local_offset};

/// RFC3339 timestamp formatter for log lines.
///
/// With [`LoggerTimeZone::Local`] the cached local offset is read on every
/// call, so DST changes picked up by [`super::init_local_offset`] show up
/// without reinstalling the subscriber.
#[derive(Debug, Clone, Copy)]
pub struct LoggerRfc3339 {
    tz: LoggerTimeZone,
}

impl LoggerRfc3339 {
    pub fn new(tz: LoggerTimeZone) -> Self {
        Self { tz }
    }

    fn offset(&self) -> UtcOffset {
        match self.tz {
            LoggerTimeZone::Utc => UtcOffset::UTC,
            LoggerTimeZone::Local => get_or_detect_local_offset(),
        }
    }
}

impl FormatTime for LoggerRfc3339 {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = OffsetDateTime::now_utc().to_offset(self.offset());
        match now.format(&Rfc3339) {
            Ok(ts) => write!(w, "{ts} "),
            Err(_) => write!(w, "<invalid-time> "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_timer_uses_zero_offset() {
        assert_eq!(LoggerRfc3339::new(LoggerTimeZone::Utc).offset(), UtcOffset::UTC);
    }

    #[test]
    fn formats_rfc3339_with_trailing_space() {
        let timer = LoggerRfc3339::new(LoggerTimeZone::Utc);
        let mut buf = String::new();
        timer.format_time(&mut Writer::new(&mut buf)).unwrap();

        assert!(buf.ends_with(' '));
        assert!(buf.trim_end().ends_with('Z'), "unexpected timestamp: {buf}");
    }
}
