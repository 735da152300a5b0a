use crate::countdown::{DEFAULT_COMPLETED_MESSAGE, EngineSettings, TICK_PERIOD};
use crate::resolver::MS_PER_HOUR;
use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_PREFIX: &str = "PTIMER";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub speedup: SpeedupConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SpeedupConfig {
    /// Hours removed by each potion
    #[serde(default = "default_reduction_hours")]
    pub reduction_per_item_hours: u32,
    /// Treat an explicit count of 0 as "not chosen"
    #[serde(default)]
    pub zero_means_unset: bool,
}

fn default_reduction_hours() -> u32 {
    10
}

impl Default for SpeedupConfig {
    fn default() -> Self {
        Self {
            reduction_per_item_hours: default_reduction_hours(),
            zero_means_unset: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CountdownConfig {
    #[serde(default = "default_completed_message")]
    pub completed_message: String,
}

fn default_completed_message() -> String {
    DEFAULT_COMPLETED_MESSAGE.to_string()
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            completed_message: default_completed_message(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. "potion_timer=debug"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl SpeedupConfig {
    pub fn validate(&self) -> Result<()> {
        if self.reduction_per_item_hours == 0 {
            anyhow::bail!("Speed-up reduction per potion must be greater than 0");
        }
        Ok(())
    }
}

impl CountdownConfig {
    pub fn validate(&self) -> Result<()> {
        if self.completed_message.trim().is_empty() {
            anyhow::bail!("Completed message must not be empty");
        }
        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.speedup.validate()?;
        self.countdown.validate()?;
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            tick_period: TICK_PERIOD,
            reduction_per_item_ms: u64::from(self.speedup.reduction_per_item_hours) * MS_PER_HOUR,
            completed_message: self.countdown.completed_message.clone(),
        }
    }
}

/// Load a config file layered with `PTIMER__*` environment overrides.
/// A missing file yields defaults.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config loader")?;

    let config: Config = loader
        .try_deserialize()
        .context("Failed to parse config file")?;

    config.validate()?;
    Ok(config)
}

pub fn load() -> Result<Config> {
    let config_path = crate::platform::config_path()?;
    load_from_path(&config_path)
}
