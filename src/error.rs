use std::fmt;
use thiserror::Error;

/// Inputs a countdown calculation needs before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    StartTime,
    Duration,
    SpeedupCount,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InputField::StartTime => "start time",
            InputField::Duration => "duration",
            InputField::SpeedupCount => "potion count",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("Missing required input: {}", join_fields(.missing))]
    Validation { missing: Vec<InputField> },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid start time '{0}', expected 'now', RFC 3339 or 'YYYY-MM-DD HH:MM'")]
    InvalidStart(String),
}

impl TimerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TimerError::Validation { .. })
    }
}

fn join_fields(fields: &[InputField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
