use clap::Subcommand;

use humanos_core::AppConfig;

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one config value
    Get { key: String },
    /// Set a config value
    Set { key: String, value: String },
    /// Print the whole config
    Show,
}

pub fn run(action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let cfg = AppConfig::load()?;
            match cfg.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut cfg = AppConfig::load()?;
            cfg.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::Show => {
            let cfg = AppConfig::load()?;
            print_json(&cfg)?;
        }
    }
    Ok(())
}
