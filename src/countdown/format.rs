use serde::Serialize;
use std::fmt;

pub const DEFAULT_COMPLETED_MESSAGE: &str = "Completed!";

const MINUTES_PER_DAY: u64 = 24 * 60;

/// Remaining time split into whole days, hours and minutes.
/// Seconds are truncated, never rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RemainingBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl RemainingBreakdown {
    pub fn from_millis(remaining_ms: u64) -> Self {
        let total_minutes = remaining_ms / 60_000;
        let days = total_minutes / MINUTES_PER_DAY;
        let rest = total_minutes % MINUTES_PER_DAY;
        Self {
            days,
            hours: rest / 60,
            minutes: rest % 60,
        }
    }
}

impl fmt::Display for RemainingBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} day(s) {} hour(s) {} minute(s) remaining",
            self.days, self.hours, self.minutes
        )
    }
}

pub fn format_remaining(remaining_ms: u64) -> String {
    RemainingBreakdown::from_millis(remaining_ms).to_string()
}
