use crate::error::TimerError;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Parse a start instant supplied on the command line.
///
/// Accepts `now`, RFC 3339 (`2026-01-08T14:00:00+09:00`), or a naive
/// `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM[:SS]` read in the host's
/// local time zone.
pub fn parse_start(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimerError> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("now") {
        return Ok(now);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    for format in &formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            // Ambiguous local times (DST fold) take the earlier instant.
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc))
                .ok_or_else(|| TimerError::InvalidStart(input.to_string()));
        }
    }

    Err(TimerError::InvalidStart(input.to_string()))
}
