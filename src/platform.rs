//! Config file location with a platform fallback.

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const APP_DIR: &str = "potion-timer";
const CONFIG_FILE: &str = "config.toml";

/// Resolve the config file path.
///
/// Priority order:
/// 1. Home directory (~/.potion-timer/config.toml), if it exists
/// 2. Platform config directory (XDG on Linux, AppData on Windows)
/// 3. Home directory path even if absent (defaults apply)
pub fn config_path() -> Result<PathBuf> {
    let home_dir = home::home_dir().map(|home| home.join(format!(".{}", APP_DIR)));

    if let Some(dir) = &home_dir
        && dir.is_dir()
    {
        return Ok(dir.join(CONFIG_FILE));
    }

    // - Linux: ~/.config/potion-timer
    // - macOS: ~/Library/Application Support/potion-timer
    // - Windows: C:\Users\<User>\AppData\Roaming\potion-timer
    if let Some(config) = dirs::config_dir() {
        let dir = config.join(APP_DIR);
        if dir.is_dir() {
            return Ok(dir.join(CONFIG_FILE));
        }
    }

    home_dir
        .map(|dir| dir.join(CONFIG_FILE))
        .context("Could not find home directory")
}
