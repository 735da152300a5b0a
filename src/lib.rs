pub mod commands;
pub mod config;
pub mod countdown;
pub mod error;
pub mod input;
pub mod logging;
pub mod platform;
pub mod resolver;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
