//! Live countdown engine.
//!
//! Owns the single tick task. Every transition that installs a new target
//! first cancels the previous task, and a generation counter checked under
//! the engine lock guarantees that a cancelled task never emits again even
//! if it was mid-tick when aborted.

use super::clock::{Clock, SystemClock};
use super::format::{DEFAULT_COMPLETED_MESSAGE, RemainingBreakdown};
use super::machine::{CountdownMachine, CountdownState, Emission, TargetInstant};
use crate::error::{InputField, TimerError};
use crate::resolver::{
    DEFAULT_REDUCTION_PER_ITEM_MS, EffectiveDuration, NominalDuration, Resolver, SpeedupCount,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub tick_period: Duration,
    pub reduction_per_item_ms: u64,
    pub completed_message: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_period: TICK_PERIOD,
            reduction_per_item_ms: DEFAULT_REDUCTION_PER_ITEM_MS,
            completed_message: DEFAULT_COMPLETED_MESSAGE.to_string(),
        }
    }
}

/// Inputs to a calculation. `None` means the user has not chosen a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculateRequest {
    pub start: Option<DateTime<Utc>>,
    pub nominal: Option<NominalDuration>,
    pub speedup: Option<SpeedupCount>,
}

impl CalculateRequest {
    /// Split into concrete inputs, or report every missing one.
    pub fn validate(&self) -> Result<(DateTime<Utc>, NominalDuration, SpeedupCount), TimerError> {
        match (self.start, self.nominal, self.speedup) {
            (Some(start), Some(nominal), Some(speedup)) => Ok((start, nominal, speedup)),
            _ => {
                let mut missing = Vec::new();
                if self.start.is_none() {
                    missing.push(InputField::StartTime);
                }
                if self.nominal.is_none() {
                    missing.push(InputField::Duration);
                }
                if self.speedup.is_none() {
                    missing.push(InputField::SpeedupCount);
                }
                Err(TimerError::Validation { missing })
            }
        }
    }
}

/// Result of a successful calculation.
#[derive(Debug, Clone, Serialize)]
pub struct Calculation {
    pub start: DateTime<Utc>,
    pub nominal: NominalDuration,
    pub speedup: SpeedupCount,
    pub effective: EffectiveDuration,
    pub target: TargetInstant,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownEvent {
    Remaining {
        breakdown: RemainingBreakdown,
        text: String,
    },
    Completed {
        text: String,
    },
    /// Previously displayed output was withdrawn by a reset.
    Cleared,
}

impl CountdownEvent {
    pub fn text(&self) -> &str {
        match self {
            CountdownEvent::Remaining { text, .. } | CountdownEvent::Completed { text } => text,
            CountdownEvent::Cleared => "",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, CountdownEvent::Completed { .. })
    }
}

struct Shared {
    machine: CountdownMachine,
    generation: u64,
    events: UnboundedSender<CountdownEvent>,
    completed_message: String,
}

impl Shared {
    fn publish(&self, emission: Emission) {
        let event = match emission {
            Emission::Remaining(breakdown) => CountdownEvent::Remaining {
                breakdown,
                text: breakdown.to_string(),
            },
            Emission::Completed => CountdownEvent::Completed {
                text: self.completed_message.clone(),
            },
        };
        if self.events.send(event).is_err() {
            tracing::debug!("countdown event receiver dropped");
        }
    }
}

pub struct CountdownEngine<C: Clock = SystemClock> {
    clock: Arc<C>,
    shared: Arc<Mutex<Shared>>,
    ticker: Option<JoinHandle<()>>,
    resolver: Resolver,
    tick_period: Duration,
}

impl CountdownEngine<SystemClock> {
    pub fn with_system_clock(
        settings: EngineSettings,
    ) -> (Self, UnboundedReceiver<CountdownEvent>) {
        Self::new(SystemClock, settings)
    }
}

impl<C: Clock> CountdownEngine<C> {
    pub fn new(clock: C, settings: EngineSettings) -> (Self, UnboundedReceiver<CountdownEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Shared {
            machine: CountdownMachine::new(),
            generation: 0,
            events: tx,
            completed_message: settings.completed_message,
        };
        let engine = Self {
            clock: Arc::new(clock),
            shared: Arc::new(Mutex::new(shared)),
            ticker: None,
            resolver: Resolver::new(settings.reduction_per_item_ms),
            tick_period: settings.tick_period,
        };
        (engine, rx)
    }

    pub fn state(&self) -> CountdownState {
        lock(&self.shared).machine.state()
    }

    pub fn has_active_ticker(&self) -> bool {
        self.ticker.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Validate inputs, resolve the effective duration and start counting down.
    ///
    /// On missing inputs the engine is reset to `Idle` and a validation
    /// error is returned instead of any remaining-time output.
    /// Must be called from within a Tokio runtime.
    pub fn calculate(&mut self, request: CalculateRequest) -> Result<Calculation, TimerError> {
        let (start, nominal, speedup) = match request.validate() {
            Ok(inputs) => inputs,
            Err(err) => {
                tracing::warn!(error = %err, "countdown calculation rejected");
                self.reset();
                return Err(err);
            }
        };

        let effective = self.resolver.resolve(nominal, speedup);
        let target = TargetInstant::new(start, effective);
        tracing::debug!(
            %start,
            %nominal,
            speedup = speedup.get(),
            effective_ms = effective.as_millis(),
            target = %target.at(),
            "countdown calculated"
        );

        let emission = self.on_target_changed(target);
        let text = match emission {
            Emission::Remaining(breakdown) => breakdown.to_string(),
            Emission::Completed => lock(&self.shared).completed_message.clone(),
        };

        Ok(Calculation {
            start,
            nominal,
            speedup,
            effective,
            target,
            text,
        })
    }

    /// Install a new target: cancel the prior tick, emit the current value,
    /// then schedule the recurring tick if the countdown is still running.
    pub fn on_target_changed(&mut self, target: TargetInstant) -> Emission {
        self.cancel_ticker();

        let now = self.clock.now();
        let (emission, generation) = {
            let mut shared = lock(&self.shared);
            let emission = shared.machine.start(target, now);
            shared.publish(emission);
            (emission, shared.generation)
        };

        match emission {
            Emission::Remaining(_) => {
                self.ticker = Some(self.spawn_ticker(generation));
            }
            Emission::Completed => {
                tracing::debug!("countdown completed on start");
            }
        }
        emission
    }

    /// Cancel any tick and return to `Idle`, withdrawing displayed output.
    pub fn reset(&mut self) {
        self.cancel_ticker();
        let mut shared = lock(&self.shared);
        if shared.machine.reset() && shared.events.send(CountdownEvent::Cleared).is_err() {
            tracing::debug!("countdown event receiver dropped");
        }
    }

    /// Cancel any active tick. Called automatically on drop.
    pub fn dispose(&mut self) {
        self.cancel_ticker();
    }

    fn cancel_ticker(&mut self) {
        lock(&self.shared).generation += 1;
        if let Some(handle) = self.ticker.take() {
            handle.abort();
            tracing::debug!("cancelled previous countdown tick");
        }
    }

    fn spawn_ticker(&self, generation: u64) -> JoinHandle<()> {
        let clock = Arc::clone(&self.clock);
        let shared = Arc::clone(&self.shared);
        let period = self.tick_period;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let now = clock.now();
                let mut guard = lock(&shared);
                if guard.generation != generation {
                    break;
                }
                match guard.machine.tick(now) {
                    Some(emission) => {
                        guard.publish(emission);
                        if emission == Emission::Completed {
                            tracing::debug!(%now, "countdown completed");
                            break;
                        }
                    }
                    None => break,
                }
            }
        })
    }
}

impl<C: Clock> Drop for CountdownEngine<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
