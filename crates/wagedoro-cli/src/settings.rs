//! Command-line overrides layered over the config file.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;
use wagedoro_core::Config;

#[derive(Args, Debug, Default)]
pub struct Settings {
    /// Config file to read instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Work phase length in minutes
    #[arg(long = "work", global = true, value_name = "MINUTES")]
    pub work_minutes: Option<u64>,

    /// Break phase length in minutes
    #[arg(long = "break", global = true, value_name = "MINUTES")]
    pub break_minutes: Option<u64>,

    /// Starting hourly wage
    #[arg(long = "wage", global = true, value_name = "AMOUNT")]
    pub hourly_wage: Option<f64>,

    /// Nominal tick period in milliseconds
    #[arg(long = "tick-ms", global = true, value_name = "MS")]
    pub tick_interval_ms: Option<u64>,
}

impl Settings {
    pub fn config_path(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::default_path()?),
        }
    }

    /// Load the config file, apply flags on top and validate the result.
    pub fn resolve(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let path = self.config_path()?;
        let mut config = Config::load_from(&path)?;

        if let Some(v) = self.work_minutes {
            config.work_minutes = v;
        }
        if let Some(v) = self.break_minutes {
            config.break_minutes = v;
        }
        if let Some(v) = self.hourly_wage {
            config.hourly_wage = v;
        }
        if let Some(v) = self.tick_interval_ms {
            config.tick_interval_ms = v;
        }

        config.validate()?;
        debug!(?config, path = %path.display(), "resolved config");
        Ok(config)
    }
}
