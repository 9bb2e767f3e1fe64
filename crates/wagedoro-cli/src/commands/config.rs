use clap::Subcommand;

use crate::settings::Settings;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective config (file plus flags) as TOML
    Show,
    /// Get one effective config value
    Get {
        /// Config key (e.g. "work_minutes", "hourly_wage")
        key: String,
    },
}

pub fn run(settings: &Settings, action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Path => {
            println!("{}", settings.config_path()?.display());
        }
        ConfigAction::Show => {
            let config = settings.resolve()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Get { key } => {
            let config = settings.resolve()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
    }
    Ok(())
}
