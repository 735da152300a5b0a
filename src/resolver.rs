//! Effective duration computation: nominal duration minus potion speed-up.

use crate::error::TimerError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MS_PER_MINUTE: u64 = 60_000;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Each potion removes ten hours from the remaining work.
pub const DEFAULT_REDUCTION_PER_ITEM_MS: u64 = 10 * MS_PER_HOUR;

/// User-entered duration before any speed-up is applied.
///
/// Fields are not required to be normalized: `{ hours: 30 }` is accepted
/// and converts to the same milliseconds as `{ days: 1, hours: 6 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NominalDuration {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
}

impl NominalDuration {
    pub fn new(days: u32, hours: u32, minutes: u32) -> Self {
        Self {
            days,
            hours,
            minutes,
        }
    }

    /// Build from possibly negative components. Negative values are rejected.
    pub fn from_signed(days: i64, hours: i64, minutes: i64) -> Result<Self, TimerError> {
        Ok(Self {
            days: non_negative("days", days)?,
            hours: non_negative("hours", hours)?,
            minutes: non_negative("minutes", minutes)?,
        })
    }

    pub fn as_millis(&self) -> u64 {
        let hours = u64::from(self.days) * 24 + u64::from(self.hours);
        let minutes = hours * 60 + u64::from(self.minutes);
        minutes * MS_PER_MINUTE
    }
}

impl fmt::Display for NominalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}

/// Number of potions applied. Zero means no reduction, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeedupCount(pub u32);

impl SpeedupCount {
    pub fn from_signed(count: i64) -> Result<Self, TimerError> {
        non_negative("potion count", count).map(SpeedupCount)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Duration to wait from the start instant, never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectiveDuration(u64);

impl EffectiveDuration {
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn to_chrono(self) -> chrono::Duration {
        // Saturates far beyond any reachable nominal duration.
        chrono::Duration::milliseconds(i64::try_from(self.0).unwrap_or(i64::MAX / 2))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    reduction_per_item_ms: u64,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_REDUCTION_PER_ITEM_MS)
    }
}

impl Resolver {
    pub fn new(reduction_per_item_ms: u64) -> Self {
        Self {
            reduction_per_item_ms,
        }
    }

    pub fn reduction_ms(&self, count: SpeedupCount) -> u64 {
        u64::from(count.get()).saturating_mul(self.reduction_per_item_ms)
    }

    pub fn resolve(&self, nominal: NominalDuration, count: SpeedupCount) -> EffectiveDuration {
        let effective = nominal.as_millis().saturating_sub(self.reduction_ms(count));
        EffectiveDuration(effective)
    }
}

/// Resolve with the default ten-hour reduction per potion.
pub fn resolve(nominal: NominalDuration, count: SpeedupCount) -> EffectiveDuration {
    Resolver::default().resolve(nominal, count)
}

fn non_negative(name: &str, value: i64) -> Result<u32, TimerError> {
    if value < 0 {
        return Err(TimerError::InvalidInput(format!(
            "{} must not be negative (got {})",
            name, value
        )));
    }
    u32::try_from(value)
        .map_err(|_| TimerError::InvalidInput(format!("{} is too large (got {})", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_to_millis() {
        assert_eq!(NominalDuration::new(1, 0, 0).as_millis(), 86_400_000);
        assert_eq!(NominalDuration::new(0, 1, 1).as_millis(), 3_660_000);
    }

    #[test]
    fn test_unnormalized_fields() {
        assert_eq!(
            NominalDuration::new(0, 30, 0).as_millis(),
            NominalDuration::new(1, 6, 0).as_millis()
        );
        assert_eq!(
            NominalDuration::new(0, 0, 90).as_millis(),
            NominalDuration::new(0, 1, 30).as_millis()
        );
    }

    #[test]
    fn test_resolve_no_speedup() {
        let effective = resolve(NominalDuration::new(1, 0, 0), SpeedupCount(0));
        assert_eq!(effective.as_millis(), 86_400_000);
    }

    #[test]
    fn test_resolve_clamps_to_zero() {
        let effective = resolve(NominalDuration::new(0, 5, 0), SpeedupCount(1));
        assert!(effective.is_zero());

        let exact = resolve(NominalDuration::new(0, 10, 0), SpeedupCount(1));
        assert!(exact.is_zero());
    }

    #[test]
    fn test_resolve_subtracts_reduction() {
        let effective = resolve(NominalDuration::new(2, 0, 0), SpeedupCount(1));
        assert_eq!(effective.as_millis(), 136_800_000);
    }

    #[test]
    fn test_custom_reduction() {
        let resolver = Resolver::new(MS_PER_HOUR);
        let effective = resolver.resolve(NominalDuration::new(0, 3, 0), SpeedupCount(2));
        assert_eq!(effective.as_millis(), MS_PER_HOUR);
    }

    #[test]
    fn test_largest_inputs_subtract_exactly() {
        let nominal = NominalDuration::new(u32::MAX, 23, 59);
        let effective = resolve(nominal, SpeedupCount(u32::MAX));

        let nominal_ms = ((u64::from(u32::MAX) * 24 + 23) * 60 + 59) * MS_PER_MINUTE;
        let reduction_ms = u64::from(u32::MAX) * DEFAULT_REDUCTION_PER_ITEM_MS;
        assert_eq!(nominal.as_millis(), nominal_ms);
        assert_eq!(effective.as_millis(), nominal_ms - reduction_ms);
    }

    #[test]
    fn test_reduction_overflow_saturates_to_zero() {
        let resolver = Resolver::new(u64::MAX);
        assert_eq!(resolver.reduction_ms(SpeedupCount(2)), u64::MAX);
        let effective = resolver.resolve(NominalDuration::new(1, 0, 0), SpeedupCount(2));
        assert!(effective.is_zero());
    }

    #[test]
    fn test_negative_components_rejected() {
        let err = NominalDuration::from_signed(0, -1, 0).unwrap_err();
        assert_eq!(
            err,
            TimerError::InvalidInput("hours must not be negative (got -1)".to_string())
        );
        assert!(SpeedupCount::from_signed(-3).is_err());
        assert_eq!(SpeedupCount::from_signed(4).unwrap(), SpeedupCount(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(NominalDuration::new(2, 3, 4).to_string(), "2d 3h 4m");
    }
}
