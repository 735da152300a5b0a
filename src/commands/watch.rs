use super::CountdownInput;
use crate::config::Config;
use crate::countdown::{CountdownEngine, CountdownEvent};
use anyhow::Result;
use chrono::{Local, Utc};

/// Run a live countdown, printing the remaining time every second until it
/// completes or the user interrupts it.
pub async fn watch(config: &Config, input: &CountdownInput) -> Result<()> {
    let request = input.to_request(config, Utc::now())?;
    let (mut engine, mut events) = CountdownEngine::with_system_clock(config.engine_settings());

    let calculation = engine.calculate(request)?;
    println!(
        "Counting down to {}",
        calculation
            .target
            .at()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    );

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(CountdownEvent::Completed { text }) => {
                    println!("{}", text);
                    break;
                }
                Some(event @ CountdownEvent::Remaining { .. }) => println!("{}", event.text()),
                Some(CountdownEvent::Cleared) => {}
                None => break,
            },
            _ = &mut ctrl_c => {
                tracing::info!("countdown interrupted");
                println!("Countdown stopped.");
                break;
            }
        }
    }

    engine.dispose();
    Ok(())
}
