//! Countdown state machine with no timers of its own.
//! Callers supply `now` on every transition, so it is testable without a runtime.

use super::format::RemainingBreakdown;
use crate::resolver::EffectiveDuration;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Completion deadline: start instant plus effective duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetInstant(DateTime<Utc>);

impl TargetInstant {
    pub fn new(start: DateTime<Utc>, effective: EffectiveDuration) -> Self {
        let at = start
            .checked_add_signed(effective.to_chrono())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self(at)
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.0
    }

    /// Signed milliseconds until the deadline. Negative once it has passed.
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        (self.0 - now).num_milliseconds()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Idle,
    Running(TargetInstant),
    Completed,
}

/// Output produced by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    Remaining(RemainingBreakdown),
    Completed,
}

#[derive(Debug)]
pub struct CountdownMachine {
    state: CountdownState,
}

impl Default for CountdownMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownMachine {
    pub fn new() -> Self {
        Self {
            state: CountdownState::Idle,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running(_))
    }

    /// Install a new target from any state and evaluate it immediately.
    ///
    /// A deadline that is not strictly in the future completes without
    /// ever running.
    pub fn start(&mut self, target: TargetInstant, now: DateTime<Utc>) -> Emission {
        if target.remaining_ms(now) <= 0 {
            self.state = CountdownState::Completed;
            return Emission::Completed;
        }
        self.state = CountdownState::Running(target);
        self.evaluate(target, now)
    }

    /// Periodic re-evaluation. Only a running countdown produces output.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Emission> {
        match self.state {
            CountdownState::Running(target) => Some(self.evaluate(target, now)),
            CountdownState::Idle | CountdownState::Completed => None,
        }
    }

    /// Return to `Idle`. Reports whether anything was being displayed.
    pub fn reset(&mut self) -> bool {
        let was_showing = self.state != CountdownState::Idle;
        self.state = CountdownState::Idle;
        was_showing
    }

    fn evaluate(&mut self, target: TargetInstant, now: DateTime<Utc>) -> Emission {
        let remaining = target.remaining_ms(now);
        if remaining < 0 {
            self.state = CountdownState::Completed;
            return Emission::Completed;
        }
        Emission::Remaining(RemainingBreakdown::from_millis(remaining as u64))
    }
}
