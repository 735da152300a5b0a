pub mod clock;
pub mod engine;
pub mod format;
pub mod machine;

pub use clock::{Clock, RuntimeClock, SystemClock};
pub use engine::{
    CalculateRequest, Calculation, CountdownEngine, CountdownEvent, EngineSettings, TICK_PERIOD,
};
pub use format::{DEFAULT_COMPLETED_MESSAGE, RemainingBreakdown, format_remaining};
pub use machine::{CountdownMachine, CountdownState, Emission, TargetInstant};
