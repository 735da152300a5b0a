pub mod calc;
pub mod config;
pub mod watch;

use crate::config::Config;
use crate::countdown::CalculateRequest;
use crate::error::TimerError;
use crate::input::parse_start;
use crate::resolver::{NominalDuration, SpeedupCount};
use chrono::{DateTime, Utc};

/// Raw countdown inputs as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CountdownInput {
    pub start: Option<String>,
    pub days: Option<i64>,
    pub hours: Option<i64>,
    pub minutes: Option<i64>,
    pub potions: Option<i64>,
}

impl CountdownInput {
    /// Convert to a calculation request. Absent values stay `None` so the
    /// engine reports them; malformed values fail here.
    pub fn to_request(
        &self,
        config: &Config,
        now: DateTime<Utc>,
    ) -> Result<CalculateRequest, TimerError> {
        let start = self
            .start
            .as_deref()
            .map(|s| parse_start(s, now))
            .transpose()?;

        let nominal = if self.days.is_none() && self.hours.is_none() && self.minutes.is_none() {
            None
        } else {
            Some(NominalDuration::from_signed(
                self.days.unwrap_or(0),
                self.hours.unwrap_or(0),
                self.minutes.unwrap_or(0),
            )?)
        };

        let speedup = self
            .potions
            .map(SpeedupCount::from_signed)
            .transpose()?
            .filter(|count| !(config.speedup.zero_means_unset && count.get() == 0));

        Ok(CalculateRequest {
            start,
            nominal,
            speedup,
        })
    }
}
