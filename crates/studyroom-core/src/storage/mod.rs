mod config;

pub use config::{Config, PlannerSettings, PomodoroSettings};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/studyroom[-dev]/` based on STUDYROOM_ENV.
///
/// Set STUDYROOM_ENV=dev to use the development directory, or
/// STUDYROOM_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if no config directory can be determined or created.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("STUDYROOM_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::config_dir()
                .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
                .ok_or(ConfigError::NoConfigDir)?;
            let env = std::env::var("STUDYROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studyroom-dev")
            } else {
                base_dir.join("studyroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
