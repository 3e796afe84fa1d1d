//! The config command: inspect and initialise the configuration file.

use anyhow::{Context, Result};

use sharedash_core::config::Config;

use super::{ConfigAction, ConfigArgs};

/// Run the config command.
pub fn run(args: &ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = super::load_config();
            let content = toml::to_string_pretty(&config).context("serialize configuration")?;
            print!("{content}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path().display());
            Ok(())
        }
        ConfigAction::Init => {
            let path = Config::config_path();
            if path.exists() {
                println!("Configuration already exists at {}", path.display());
                return Ok(());
            }
            Config::default()
                .save()
                .context("write default configuration")?;
            println!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}
