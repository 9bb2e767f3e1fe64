//! TOML-based configuration.
//!
//! Holds the phase lengths, the starting hourly wage and the nominal tick
//! period. The file is read at startup only; nothing is ever written back.
//!
//! Configuration lives at `<config dir>/wagedoro/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::timer::Durations;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
    /// Wage the session starts with; editable while running.
    #[serde(default = "default_hourly_wage")]
    pub hourly_wage: f64,
    /// Nominal period of both tick streams.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

// Default functions
fn default_work_minutes() -> u64 {
    25
}
fn default_break_minutes() -> u64 {
    5
}
fn default_hourly_wage() -> f64 {
    20.0
}
fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            hourly_wage: default_hourly_wage(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Returns `<config dir>/wagedoro[-dev]/` based on WAGEDORO_ENV.
///
/// Set WAGEDORO_ENV=dev to use the development directory. The directory is
/// not created.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let env = std::env::var("WAGEDORO_ENV").unwrap_or_else(|_| "production".to_string());
    Ok(if env == "dev" {
        base.join("wagedoro-dev")
    } else {
        base.join("wagedoro")
    })
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "loading config");
                Ok(Self::from_toml(&content)?)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reject values the timer cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for zero-length phases, a zero
    /// tick period, or a negative or non-finite starting wage.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.work_minutes == 0 {
            return Err(invalid("work_minutes", "must be at least 1"));
        }
        if self.break_minutes == 0 {
            return Err(invalid("break_minutes", "must be at least 1"));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be at least 1"));
        }
        if !self.hourly_wage.is_finite() || self.hourly_wage < 0.0 {
            return Err(invalid("hourly_wage", "must be a non-negative number"));
        }
        Ok(())
    }

    pub fn durations(&self) -> Durations {
        Durations::from_minutes(self.work_minutes, self.break_minutes)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Get a config value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
