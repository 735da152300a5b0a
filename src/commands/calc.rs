use super::CountdownInput;
use crate::OutputFormat;
use crate::config::Config;
use crate::countdown::{CountdownMachine, Emission, TargetInstant};
use crate::resolver::{EffectiveDuration, NominalDuration, Resolver, SpeedupCount};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CalcSummary {
    pub start: DateTime<Utc>,
    pub nominal: NominalDuration,
    pub potions: SpeedupCount,
    pub reduction_ms: u64,
    pub effective_ms: EffectiveDuration,
    pub target: DateTime<Utc>,
    pub completed: bool,
    pub text: String,
}

/// Evaluate a countdown once against the current time without ticking.
pub fn summarize(
    config: &Config,
    input: &CountdownInput,
    now: DateTime<Utc>,
) -> Result<CalcSummary> {
    let request = input.to_request(config, now)?;
    let settings = config.engine_settings();

    let (start, nominal, potions) = request.validate()?;

    let resolver = Resolver::new(settings.reduction_per_item_ms);
    let effective = resolver.resolve(nominal, potions);
    let target = TargetInstant::new(start, effective);

    let mut machine = CountdownMachine::new();
    let (completed, text) = match machine.start(target, now) {
        Emission::Remaining(breakdown) => (false, breakdown.to_string()),
        Emission::Completed => (true, settings.completed_message.clone()),
    };

    Ok(CalcSummary {
        start,
        nominal,
        potions,
        reduction_ms: resolver.reduction_ms(potions),
        effective_ms: effective,
        target: target.at(),
        completed,
        text,
    })
}

pub fn calc(config: &Config, input: &CountdownInput, format: OutputFormat) -> Result<()> {
    let summary = summarize(config, input, Utc::now())?;

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let start_local = summary.start.with_timezone(&Local);
            let target_local = summary.target.with_timezone(&Local);
            println!("Start:     {}", start_local.format("%Y-%m-%d %H:%M:%S"));
            println!(
                "Duration:  {} ({} potion(s))",
                summary.nominal,
                summary.potions.get()
            );
            println!(
                "Effective: {}",
                crate::countdown::format_remaining(summary.effective_ms.as_millis())
                    .trim_end_matches(" remaining")
            );
            println!("Done at:   {}", target_local.format("%Y-%m-%d %H:%M:%S"));
            println!("{}", summary.text);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_summarize_running() {
        let now = Utc.with_ymd_and_hms(2026, 1, 7, 18, 0, 0).unwrap();
        let input = CountdownInput {
            start: Some("2026-01-07T17:00:00Z".to_string()),
            days: Some(2),
            potions: Some(1),
            ..Default::default()
        };

        let summary = summarize(&Config::default(), &input, now).unwrap();
        assert_eq!(summary.effective_ms.as_millis(), 136_800_000);
        assert_eq!(
            summary.target,
            Utc.with_ymd_and_hms(2026, 1, 9, 7, 0, 0).unwrap()
        );
        assert!(!summary.completed);
        assert_eq!(summary.text, "1 day(s) 13 hour(s) 0 minute(s) remaining");
    }

    #[test]
    fn test_summarize_missing_duration() {
        let now = Utc.with_ymd_and_hms(2026, 1, 7, 18, 0, 0).unwrap();
        let input = CountdownInput {
            start: Some("now".to_string()),
            potions: Some(1),
            ..Default::default()
        };

        let err = summarize(&Config::default(), &input, now).unwrap_err();
        assert!(err.to_string().contains("duration"));
    }
}
