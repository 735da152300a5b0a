use chrono::{DateTime, Utc};

/// Source of wall-clock time for countdown evaluation.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Host wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall clock anchored at `base` that advances with the Tokio runtime clock.
///
/// Under a paused runtime (`tokio::time::pause`) wall time only moves when
/// the runtime clock does, which keeps tick timing deterministic.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeClock {
    base: DateTime<Utc>,
    origin: tokio::time::Instant,
}

impl RuntimeClock {
    pub fn new(base: DateTime<Utc>) -> Self {
        Self {
            base,
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Clock for RuntimeClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = tokio::time::Instant::now().duration_since(self.origin);
        let elapsed = chrono::Duration::from_std(elapsed).unwrap_or(chrono::Duration::zero());
        self.base + elapsed
    }
}
